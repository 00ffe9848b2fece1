//! The slice of the DOM the page behaviours need.
//!
//! Behaviours only see these traits, so they run unchanged against the real
//! document (see `browser::node`) and against in-memory fakes in tests.

use std::rc::Rc;

pub trait Node {
    /// Adds `class` when `on` is true, removes it otherwise.
    fn toggle_class(&self, class: &str, on: bool);
    fn has_class(&self, class: &str) -> bool;
    fn set_attribute(&self, name: &str, value: &str);
    /// Sets the inline `display` style.
    fn set_display(&self, value: &str);
    /// Reads a layout property so pending style changes are flushed before the
    /// next class change, letting CSS transitions run from the flushed state.
    fn force_layout(&self);
    /// Distance from the top of the viewport to the top of the element.
    fn viewport_top(&self) -> f64;
    fn text(&self) -> String;
    fn set_text(&self, text: &str);
}

pub type NodeRef = Rc<dyn Node>;

pub trait Viewport {
    fn scroll_y(&self) -> f64;
    fn inner_height(&self) -> f64;
}

/// The button that triggers a form submission.
pub trait SubmitControl {
    fn set_disabled(&self, disabled: bool);
    fn label(&self) -> String;
    fn set_label(&self, label: &str);
}

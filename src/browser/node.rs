use web_sys::{HtmlButtonElement, HtmlElement, Window};

use crate::dom::{Node, SubmitControl, Viewport};

pub struct DomNode(HtmlElement);

impl DomNode {
    pub fn new(element: HtmlElement) -> Self {
        Self(element)
    }
}

impl Node for DomNode {
    fn toggle_class(&self, class: &str, on: bool) {
        let _ = self.0.class_list().toggle_with_force(class, on);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let _ = self.0.set_attribute(name, value);
    }

    fn set_display(&self, value: &str) {
        let _ = self.0.style().set_property("display", value);
    }

    fn force_layout(&self) {
        let _ = self.0.offset_width();
    }

    fn viewport_top(&self) -> f64 {
        self.0.get_bounding_client_rect().top()
    }

    fn text(&self) -> String {
        self.0.text_content().unwrap_or_default()
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }
}

pub struct BrowserViewport(pub Window);

impl Viewport for BrowserViewport {
    fn scroll_y(&self) -> f64 {
        self.0.scroll_y().unwrap_or(0.0)
    }

    fn inner_height(&self) -> f64 {
        self.0
            .inner_height()
            .ok()
            .and_then(|height| height.as_f64())
            .unwrap_or(0.0)
    }
}

pub struct DomButton(HtmlButtonElement);

impl DomButton {
    pub fn new(button: HtmlButtonElement) -> Self {
        Self(button)
    }
}

impl SubmitControl for DomButton {
    fn set_disabled(&self, disabled: bool) {
        self.0.set_disabled(disabled);
    }

    fn label(&self) -> String {
        self.0.text_content().unwrap_or_default()
    }

    fn set_label(&self, label: &str) {
        self.0.set_text_content(Some(label));
    }
}

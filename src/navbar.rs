use crate::dom::{NodeRef, Viewport};

pub const SCROLLED_CLASS: &str = "scrolled";

/// Marks the navbar as scrolled once the page moves past a threshold.
pub struct NavbarStyler {
    navbar: Option<NodeRef>,
    threshold: f64,
}

impl NavbarStyler {
    pub fn new(navbar: Option<NodeRef>, threshold: f64) -> Self {
        Self { navbar, threshold }
    }

    pub fn update(&self, viewport: &dyn Viewport) {
        if let Some(navbar) = &self.navbar {
            navbar.toggle_class(SCROLLED_CLASS, viewport.scroll_y() > self.threshold);
        }
    }
}

use crate::dom::NodeRef;

pub const ACTIVE_CLASS: &str = "active";

/// Keeps exactly one navigation link marked active: the last one clicked.
pub struct ActiveLinks {
    links: Vec<NodeRef>,
}

impl ActiveLinks {
    pub fn new(links: Vec<NodeRef>) -> Self {
        Self { links }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn activate(&self, index: usize) {
        let Some(clicked) = self.links.get(index) else {
            log::debug!("Ignoring click on unknown nav link {}", index);
            return;
        };
        for link in &self.links {
            link.toggle_class(ACTIVE_CLASS, false);
        }
        clicked.toggle_class(ACTIVE_CLASS, true);
    }

    pub fn active(&self) -> Option<usize> {
        self.links.iter().position(|link| link.has_class(ACTIVE_CLASS))
    }
}

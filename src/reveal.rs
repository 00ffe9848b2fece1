use crate::dom::{NodeRef, Viewport};

pub const VISIBLE_CLASS: &str = "visible";

struct FadeTarget {
    node: NodeRef,
    revealed: bool,
}

/// One-way scroll reveal. A target is revealed the first time its top edge
/// rises above `ratio` of the viewport height, and stays revealed.
pub struct ScrollReveal {
    targets: Vec<FadeTarget>,
    ratio: f64,
}

impl ScrollReveal {
    pub fn new(nodes: Vec<NodeRef>, ratio: f64) -> Self {
        let targets = nodes
            .into_iter()
            .map(|node| FadeTarget {
                node,
                revealed: false,
            })
            .collect();
        Self { targets, ratio }
    }

    /// Returns how many targets were revealed by this pass.
    pub fn reveal(&mut self, viewport: &dyn Viewport) -> usize {
        let trigger = viewport.inner_height() * self.ratio;
        let mut newly = 0;
        for target in self.targets.iter_mut().filter(|t| !t.revealed) {
            if target.node.viewport_top() < trigger {
                target.node.toggle_class(VISIBLE_CLASS, true);
                target.revealed = true;
                newly += 1;
            }
        }
        newly
    }

    pub fn remaining(&self) -> usize {
        self.targets.iter().filter(|t| !t.revealed).count()
    }
}

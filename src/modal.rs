//! Success/error modals with a timed auto-close.
//!
//! Each modal walks `Hidden -> Showing -> Visible -> Hiding -> Hidden`. The
//! controller owns the single auto-close timer: showing any modal replaces it
//! and hiding any modal cancels it. Timer callbacks hold a `Weak` back to the
//! controller, so tearing the page down silences them.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::config::Behavior;
use crate::dom::NodeRef;
use crate::timer::{Scheduler, Timer};

pub const SHOW_CLASS: &str = "show";
const ARIA_HIDDEN: &str = "aria-hidden";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalId {
    Success,
    Error,
}

impl ModalId {
    pub const ALL: [ModalId; 2] = [ModalId::Success, ModalId::Error];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Hidden,
    /// In layout but not yet transitioned in.
    Showing,
    Visible,
    /// Transitioning out; leaves layout when the transition ends.
    Hiding,
}

pub struct ModalParts {
    pub container: NodeRef,
    /// The paragraph inside `.modal-body` that carries the message.
    pub message: Option<NodeRef>,
}

struct Modal {
    parts: ModalParts,
    state: ModalState,
    settle: Option<Timer>,
}

struct AutoClose {
    modal: ModalId,
    generation: u64,
    timer: Timer,
}

struct Inner {
    scheduler: Rc<dyn Scheduler>,
    success: Option<Modal>,
    error: Option<Modal>,
    auto_close: Option<AutoClose>,
    generation: u64,
    auto_close_ms: u32,
    hide_transition_ms: u32,
}

impl Inner {
    fn slot(&mut self, id: ModalId) -> &mut Option<Modal> {
        match id {
            ModalId::Success => &mut self.success,
            ModalId::Error => &mut self.error,
        }
    }

    fn modal(&self, id: ModalId) -> Option<&Modal> {
        match id {
            ModalId::Success => self.success.as_ref(),
            ModalId::Error => self.error.as_ref(),
        }
    }
}

#[derive(Clone)]
pub struct ModalController {
    inner: Rc<RefCell<Inner>>,
}

impl ModalController {
    pub fn new(scheduler: Rc<dyn Scheduler>, behavior: &Behavior) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                scheduler,
                success: None,
                error: None,
                auto_close: None,
                generation: 0,
                auto_close_ms: behavior.auto_close_ms,
                hide_transition_ms: behavior.hide_transition_ms,
            })),
        }
    }

    /// Attaches the elements of a modal. The modal starts out hidden.
    pub fn register(&self, id: ModalId, parts: ModalParts) {
        *self.inner.borrow_mut().slot(id) = Some(Modal {
            parts,
            state: ModalState::Hidden,
            settle: None,
        });
    }

    pub fn is_registered(&self, id: ModalId) -> bool {
        self.inner.borrow().modal(id).is_some()
    }

    pub fn state(&self, id: ModalId) -> Option<ModalState> {
        self.inner.borrow().modal(id).map(|modal| modal.state)
    }

    /// The modal the pending auto-close timer will hide, if any.
    pub fn auto_close_target(&self) -> Option<ModalId> {
        self.inner.borrow().auto_close.as_ref().map(|pending| pending.modal)
    }

    pub fn show(&self, id: ModalId) {
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        if inner.modal(id).is_none() {
            log::debug!("show: {:?} modal is not on this page", id);
            return;
        }
        if let Some(previous) = inner.auto_close.take() {
            previous.timer.cancel();
        }

        if let Some(modal) = inner.slot(id).as_mut() {
            if let Some(settle) = modal.settle.take() {
                settle.cancel();
            }
            let container = &modal.parts.container;
            modal.state = ModalState::Showing;
            container.set_display("flex");
            container.force_layout();

            container.toggle_class(SHOW_CLASS, true);
            container.set_attribute(ARIA_HIDDEN, "false");
            modal.state = ModalState::Visible;
        }

        inner.generation += 1;
        let generation = inner.generation;
        let weak = Rc::downgrade(&self.inner);
        let timer = inner.scheduler.schedule(
            inner.auto_close_ms,
            Box::new(move || {
                if let Some(controller) = Self::upgrade(&weak) {
                    controller.fire_auto_close(generation);
                }
            }),
        );
        inner.auto_close = Some(AutoClose {
            modal: id,
            generation,
            timer,
        });
    }

    pub fn hide(&self, id: ModalId) {
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        let delay = inner.hide_transition_ms;
        let scheduler = inner.scheduler.clone();

        let Some(modal) = inner.slot(id).as_mut() else {
            log::debug!("hide: {:?} modal is not on this page", id);
            return;
        };
        // Leaves the shared auto-close alone; it may belong to the other modal.
        if matches!(modal.state, ModalState::Hidden | ModalState::Hiding) {
            return;
        }

        let container = &modal.parts.container;
        container.toggle_class(SHOW_CLASS, false);
        container.set_attribute(ARIA_HIDDEN, "true");
        modal.state = ModalState::Hiding;

        let weak = Rc::downgrade(&self.inner);
        modal.settle = Some(scheduler.schedule(
            delay,
            Box::new(move || {
                if let Some(controller) = Self::upgrade(&weak) {
                    controller.settle(id);
                }
            }),
        ));

        if let Some(pending) = inner.auto_close.take() {
            pending.timer.cancel();
        }
    }

    pub fn hide_all(&self) {
        for id in ModalId::ALL {
            self.hide(id);
        }
    }

    /// Replaces the text of the modal's message paragraph.
    pub fn set_message(&self, id: ModalId, text: &str) {
        let inner = self.inner.borrow();
        match inner.modal(id).and_then(|modal| modal.parts.message.as_ref()) {
            Some(message) => message.set_text(text),
            None => log::debug!("set_message: {:?} modal has no message body", id),
        }
    }

    fn upgrade(weak: &Weak<RefCell<Inner>>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    fn fire_auto_close(&self, generation: u64) {
        let target = {
            let mut inner = self.inner.borrow_mut();
            match inner.auto_close.take() {
                Some(pending) if pending.generation == generation => {
                    pending.timer.release();
                    pending.modal
                }
                stale => {
                    inner.auto_close = stale;
                    return;
                }
            }
        };
        self.hide(target);
    }

    fn settle(&self, id: ModalId) {
        let mut inner = self.inner.borrow_mut();
        if let Some(modal) = inner.slot(id).as_mut() {
            if modal.state != ModalState::Hiding {
                return;
            }
            if let Some(settle) = modal.settle.take() {
                settle.release();
            }
            modal.parts.container.set_display("none");
            modal.state = ModalState::Hidden;
        }
    }
}

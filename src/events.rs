use std::any::Any;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::modal::ModalId;

/// What a handler subscribes to. Targets are named by their role on the page;
/// the event source resolves them to concrete elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Scroll,
    /// The window finished loading all resources.
    Load,
    KeyDown,
    NavClick(usize),
    CloseClick(ModalId),
    /// A click whose target is the modal container itself rather than its content.
    BackdropClick(ModalId),
    Submit,
}

#[derive(Debug, Default)]
pub struct PageEvent {
    key: Option<String>,
    default_prevented: Cell<bool>,
}

impl PageEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            ..Self::default()
        }
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

pub type Handler = Rc<dyn Fn(&PageEvent)>;

pub trait EventSource {
    /// Registers `handler` for `topic`. The handler stays attached until the
    /// returned [`Subscription`] is dropped. Subscribing to a target that does
    /// not exist on the page yields an empty subscription.
    fn subscribe(&self, topic: Topic, handler: Handler) -> Subscription;
}

/// Keeps a listener attached; dropping it detaches the listener.
#[must_use = "dropping a subscription detaches its handler"]
pub struct Subscription {
    guards: Vec<Box<dyn Any>>,
}

impl Subscription {
    pub fn new(guard: impl Any) -> Self {
        Self {
            guards: vec![Box::new(guard)],
        }
    }

    pub fn empty() -> Self {
        Self { guards: Vec::new() }
    }

    pub fn from_guards(guards: Vec<Box<dyn Any>>) -> Self {
        Self { guards }
    }

    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }

    /// Leaves the handler attached for the lifetime of the page.
    pub fn forget(self) {
        std::mem::forget(self);
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("guards", &self.guards.len())
            .finish()
    }
}

use std::any::Any;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, HtmlFormElement, KeyboardEvent, Window};

use super::describe_js;
use crate::error::PageError;
use crate::events::{EventSource, Handler, PageEvent, Subscription, Topic};
use crate::modal::ModalId;

/// A DOM event listener that is removed again when dropped.
pub struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn attach(
        target: &EventTarget,
        kind: &'static str,
        callback: impl FnMut(Event) + 'static,
    ) -> Result<Self, PageError> {
        let callback = Closure::wrap(Box::new(callback) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            .map_err(|e| PageError::Listener {
                event: kind,
                reason: describe_js(&e),
            })?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

/// The concrete elements behind each [`Topic`].
pub struct EventTargets {
    pub window: Window,
    pub nav_links: Vec<Element>,
    pub modals: Vec<(ModalId, Element)>,
    /// Close buttons paired with the modal they sit in.
    pub close_buttons: Vec<(ModalId, Element)>,
    pub form: Option<HtmlFormElement>,
}

pub struct BrowserEvents {
    targets: EventTargets,
}

impl BrowserEvents {
    pub fn new(targets: EventTargets) -> Self {
        Self { targets }
    }

    fn listeners(&self, topic: Topic, handler: Handler) -> Result<Vec<Listener>, PageError> {
        let window: &EventTarget = self.targets.window.as_ref();
        let listeners = match topic {
            Topic::Scroll => vec![Listener::attach(window, "scroll", relay(handler))?],
            Topic::Load => vec![Listener::attach(window, "load", relay(handler))?],
            Topic::KeyDown => vec![Listener::attach(window, "keydown", move |event: Event| {
                let page_event = event
                    .dyn_ref::<KeyboardEvent>()
                    .map(|key| PageEvent::with_key(key.key()))
                    .unwrap_or_default();
                handler(&page_event);
            })?],
            Topic::NavClick(index) => match self.targets.nav_links.get(index) {
                Some(link) => vec![Listener::attach(link, "click", relay(handler))?],
                None => Vec::new(),
            },
            Topic::CloseClick(id) => self
                .targets
                .close_buttons
                .iter()
                .filter(|(modal, _)| *modal == id)
                .map(|(_, button)| Listener::attach(button, "click", relay(handler.clone())))
                .collect::<Result<_, _>>()?,
            Topic::BackdropClick(id) => match self.modal(id) {
                Some(modal) => {
                    let container: EventTarget = modal.clone().into();
                    vec![Listener::attach(modal, "click", move |event: Event| {
                        if event.target().as_ref() == Some(&container) {
                            handler(&PageEvent::new());
                        }
                    })?]
                }
                None => Vec::new(),
            },
            Topic::Submit => match &self.targets.form {
                Some(form) => vec![Listener::attach(form, "submit", move |event: Event| {
                    let page_event = PageEvent::new();
                    handler(&page_event);
                    if page_event.is_default_prevented() {
                        event.prevent_default();
                    }
                })?],
                None => Vec::new(),
            },
        };
        Ok(listeners)
    }

    fn modal(&self, id: ModalId) -> Option<&Element> {
        self.targets
            .modals
            .iter()
            .find(|(modal, _)| *modal == id)
            .map(|(_, element)| element)
    }
}

impl EventSource for BrowserEvents {
    fn subscribe(&self, topic: Topic, handler: Handler) -> Subscription {
        match self.listeners(topic, handler) {
            Ok(listeners) => Subscription::from_guards(
                listeners
                    .into_iter()
                    .map(|listener| Box::new(listener) as Box<dyn Any>)
                    .collect(),
            ),
            Err(e) => {
                log::warn!("Could not subscribe to {:?}: {}", topic, e);
                Subscription::empty()
            }
        }
    }
}

fn relay(handler: Handler) -> impl FnMut(Event) + 'static {
    move |_event: Event| handler(&PageEvent::new())
}

//! Installs every page behaviour against an [`EventSource`].

use std::cell::RefCell;
use std::rc::Rc;

use futures::future::LocalBoxFuture;

use crate::config::PageConfig;
use crate::dom::{NodeRef, SubmitControl, Viewport};
use crate::events::{EventSource, Handler, PageEvent, Subscription, Topic};
use crate::form::{ContactForm, FormHandler, Transport};
use crate::modal::{ModalController, ModalId, ModalParts};
use crate::nav_links::ActiveLinks;
use crate::navbar::NavbarStyler;
use crate::reveal::ScrollReveal;
use crate::timer::Scheduler;

const ESCAPE: &str = "Escape";

pub trait Spawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}

/// Host services the page behaviours run on.
#[derive(Clone)]
pub struct Platform {
    pub events: Rc<dyn EventSource>,
    pub viewport: Rc<dyn Viewport>,
    pub scheduler: Rc<dyn Scheduler>,
    pub spawner: Rc<dyn Spawner>,
    pub transport: Rc<dyn Transport>,
}

pub struct FormParts {
    pub form: Rc<dyn ContactForm>,
    pub submit: Option<Rc<dyn SubmitControl>>,
}

/// The elements found on the page. Anything missing is simply not wired up.
#[derive(Default)]
pub struct PageElements {
    pub navbar: Option<NodeRef>,
    pub nav_links: Vec<NodeRef>,
    pub fade_targets: Vec<NodeRef>,
    pub success_modal: Option<ModalParts>,
    pub error_modal: Option<ModalParts>,
    pub form: Option<FormParts>,
}

pub struct Page {
    modals: ModalController,
    form: Option<FormHandler>,
    subscriptions: Vec<Subscription>,
}

impl Page {
    pub fn mount(platform: &Platform, elements: PageElements, config: &PageConfig) -> Self {
        let PageElements {
            navbar,
            nav_links,
            fade_targets,
            success_modal,
            error_modal,
            form,
        } = elements;
        let events = &platform.events;
        let mut subscriptions = Vec::new();

        let navbar = Rc::new(NavbarStyler::new(navbar, config.behavior.scroll_threshold));
        {
            let navbar = navbar.clone();
            let viewport = platform.viewport.clone();
            subscriptions.push(events.subscribe(
                Topic::Scroll,
                Rc::new(move |_: &PageEvent| navbar.update(&*viewport)),
            ));
        }
        navbar.update(&*platform.viewport);

        let target_count = fade_targets.len();
        let reveal = Rc::new(RefCell::new(ScrollReveal::new(
            fade_targets,
            config.behavior.reveal_ratio,
        )));
        let on_reveal: Handler = {
            let reveal = reveal.clone();
            let viewport = platform.viewport.clone();
            Rc::new(move |_: &PageEvent| {
                reveal.borrow_mut().reveal(&*viewport);
            })
        };
        subscriptions.push(events.subscribe(Topic::Scroll, on_reveal.clone()));
        subscriptions.push(events.subscribe(Topic::Load, on_reveal));
        reveal.borrow_mut().reveal(&*platform.viewport);

        let links = Rc::new(ActiveLinks::new(nav_links));
        for index in 0..links.len() {
            let links = links.clone();
            subscriptions.push(events.subscribe(
                Topic::NavClick(index),
                Rc::new(move |_: &PageEvent| links.activate(index)),
            ));
        }

        let modals = ModalController::new(platform.scheduler.clone(), &config.behavior);
        for (id, parts) in [(ModalId::Success, success_modal), (ModalId::Error, error_modal)] {
            let Some(parts) = parts else {
                log::debug!("No {:?} modal on this page", id);
                continue;
            };
            modals.register(id, parts);
            for topic in [Topic::CloseClick(id), Topic::BackdropClick(id)] {
                let modals = modals.clone();
                subscriptions.push(events.subscribe(
                    topic,
                    Rc::new(move |_: &PageEvent| modals.hide(id)),
                ));
            }
        }
        {
            let modals = modals.clone();
            subscriptions.push(events.subscribe(
                Topic::KeyDown,
                Rc::new(move |event: &PageEvent| {
                    if event.key() == Some(ESCAPE) {
                        modals.hide_all();
                    }
                }),
            ));
        }

        let form = match form {
            Some(FormParts { form, submit }) => {
                let handler = FormHandler::new(
                    form,
                    submit,
                    platform.transport.clone(),
                    modals.clone(),
                    config.text.clone(),
                );
                let spawner = platform.spawner.clone();
                let on_submit = handler.clone();
                subscriptions.push(events.subscribe(
                    Topic::Submit,
                    Rc::new(move |event: &PageEvent| {
                        event.prevent_default();
                        let handler = on_submit.clone();
                        spawner.spawn(Box::pin(async move {
                            handler.submit().await;
                        }));
                    }),
                ));
                Some(handler)
            }
            None => {
                log::warn!(
                    "No form element ({}) found on page.",
                    config.selectors.form
                );
                None
            }
        };

        log::info!(
            "Page mounted: {} nav links, {} fade targets, form {}",
            links.len(),
            target_count,
            if form.is_some() { "wired" } else { "absent" }
        );

        Self {
            modals,
            form,
            subscriptions,
        }
    }

    pub fn modals(&self) -> &ModalController {
        &self.modals
    }

    pub fn form(&self) -> Option<&FormHandler> {
        self.form.as_ref()
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Keeps every listener attached for the rest of the document's life.
    pub fn forget(self) {
        for subscription in self.subscriptions {
            subscription.forget();
        }
    }
}

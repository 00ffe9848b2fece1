//! `web-sys` implementations of the page capabilities, plus element discovery.

mod events;
mod form;
mod node;
mod timer;

use std::rc::Rc;

use futures::future::LocalBoxFuture;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlFormElement};

pub use events::{BrowserEvents, EventTargets, Listener};
pub use form::{DomForm, FetchTransport};
pub use node::{BrowserViewport, DomButton, DomNode};
pub use timer::GlooScheduler;

use crate::config::{PageConfig, Selectors, CONFIG_ELEMENT_ID};
use crate::dom::{NodeRef, SubmitControl};
use crate::error::PageError;
use crate::modal::{ModalId, ModalParts};
use crate::page::{FormParts, Page, PageElements, Platform, Spawner};

/// Runs page futures on the browser's microtask queue.
pub struct BrowserSpawner;

impl Spawner for BrowserSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}

/// Mounts the page once the document has been parsed.
pub fn start() -> Result<(), PageError> {
    let window = web_sys::window().ok_or(PageError::NoWindow)?;
    let document = window.document().ok_or(PageError::NoDocument)?;

    if document.ready_state() != "loading" {
        mount(&load_config(&document))?.forget();
        return Ok(());
    }

    let listener = Listener::attach(&document, "DOMContentLoaded", move |_| {
        let config = web_sys::window()
            .and_then(|window| window.document())
            .map(|document| load_config(&document))
            .unwrap_or_default();
        match mount(&config) {
            Ok(page) => page.forget(),
            Err(e) => log::error!("Failed to mount page: {}", e),
        }
    })?;
    // Lives for the rest of the document.
    std::mem::forget(listener);
    Ok(())
}

/// Reads the inline `#page-config` JSON block, if the page has one.
pub fn load_config(document: &Document) -> PageConfig {
    let raw = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content());
    PageConfig::from_json_or_default(raw.as_deref())
}

pub fn mount(config: &PageConfig) -> Result<Page, PageError> {
    let window = web_sys::window().ok_or(PageError::NoWindow)?;
    let document = window.document().ok_or(PageError::NoDocument)?;
    let (elements, targets) = discover(&document, window.clone(), &config.selectors)?;

    let platform = Platform {
        events: Rc::new(BrowserEvents::new(targets)),
        viewport: Rc::new(BrowserViewport(window)),
        scheduler: Rc::new(GlooScheduler),
        spawner: Rc::new(BrowserSpawner),
        transport: Rc::new(FetchTransport),
    };
    Ok(Page::mount(&platform, elements, config))
}

/// Finds every element the page behaviours attach to.
pub fn discover(
    document: &Document,
    window: web_sys::Window,
    selectors: &Selectors,
) -> Result<(PageElements, EventTargets), PageError> {
    let navbar = query_one(document, &selectors.navbar)?.and_then(html);

    let links: Vec<HtmlElement> = query_all(document, &selectors.nav_links)?
        .into_iter()
        .filter_map(html)
        .collect();
    let fade_targets: Vec<HtmlElement> = query_all(document, &selectors.fade_targets)?
        .into_iter()
        .filter_map(html)
        .collect();

    let success = find_modal(document, &selectors.success_modal, &selectors.modal_message)?;
    let error = find_modal(document, &selectors.error_modal, &selectors.modal_message)?;
    let modal_elements: Vec<(ModalId, Element)> =
        [(ModalId::Success, &success), (ModalId::Error, &error)]
            .into_iter()
            .filter_map(|(id, found)| found.as_ref().map(|(element, _)| (id, element.clone())))
            .collect();

    let mut close_buttons = Vec::new();
    for button in query_all(document, &selectors.close_button)? {
        let enclosing = button
            .closest(&selectors.modal)
            .map_err(|e| selector_error(&selectors.modal, e))?;
        let owner = enclosing.and_then(|modal| {
            modal_elements
                .iter()
                .find(|(_, element)| *element == modal)
                .map(|(id, _)| *id)
        });
        match owner {
            Some(id) => close_buttons.push((id, button)),
            None => log::debug!("Close button outside a known modal ignored"),
        }
    }

    let form = query_one(document, &selectors.form)?
        .and_then(|element| element.dyn_into::<HtmlFormElement>().ok());
    let form_parts = match &form {
        Some(form) => {
            let submit = form
                .query_selector(&selectors.submit_button)
                .map_err(|e| selector_error(&selectors.submit_button, e))?
                .and_then(|element| element.dyn_into::<HtmlButtonElement>().ok())
                .map(|button| Rc::new(DomButton::new(button)) as Rc<dyn SubmitControl>);
            Some(FormParts {
                form: Rc::new(DomForm::new(form.clone())),
                submit,
            })
        }
        None => None,
    };

    let elements = PageElements {
        navbar: navbar.map(node),
        nav_links: links.iter().cloned().map(node).collect(),
        fade_targets: fade_targets.into_iter().map(node).collect(),
        success_modal: success.map(|(_, parts)| parts),
        error_modal: error.map(|(_, parts)| parts),
        form: form_parts,
    };
    let targets = EventTargets {
        window,
        nav_links: links.into_iter().map(Element::from).collect(),
        modals: modal_elements,
        close_buttons,
        form,
    };
    Ok((elements, targets))
}

fn find_modal(
    document: &Document,
    selector: &str,
    message_selector: &str,
) -> Result<Option<(Element, ModalParts)>, PageError> {
    let Some(container) = query_one(document, selector)?.and_then(html) else {
        return Ok(None);
    };
    let message = container
        .query_selector(message_selector)
        .map_err(|e| selector_error(message_selector, e))?
        .and_then(html);
    Ok(Some((
        Element::from(container.clone()),
        ModalParts {
            container: node(container),
            message: message.map(node),
        },
    )))
}

fn node(element: HtmlElement) -> NodeRef {
    Rc::new(DomNode::new(element))
}

fn html(element: Element) -> Option<HtmlElement> {
    element.dyn_into::<HtmlElement>().ok()
}

fn query_one(document: &Document, selector: &str) -> Result<Option<Element>, PageError> {
    document
        .query_selector(selector)
        .map_err(|e| selector_error(selector, e))
}

fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, PageError> {
    let list = document
        .query_selector_all(selector)
        .map_err(|e| selector_error(selector, e))?;
    Ok((0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|item| item.dyn_into::<Element>().ok())
        .collect())
}

fn selector_error(selector: &str, e: JsValue) -> PageError {
    PageError::Selector {
        selector: selector.to_string(),
        reason: describe_js(&e),
    }
}

pub(crate) fn describe_js(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

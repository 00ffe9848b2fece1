//! Contact form submission.

mod capability;
mod message;

use std::rc::Rc;

pub use capability::{
    ContactForm, FormPayload, FormTarget, Method, Serializer, SubmitRequest, SubmitResponse,
    Transport, Validator, ACCEPT_JSON,
};
pub use message::server_message;

use crate::config::Text;
use crate::dom::SubmitControl;
use crate::error::TransportError;
use crate::modal::{ModalController, ModalId};

/// Which branch a submission ended in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The form failed its own validation; nothing was sent.
    Invalid,
    Delivered,
    Rejected { status: u16, message: String },
    Failed(TransportError),
}

struct Inner {
    form: Rc<dyn ContactForm>,
    submit: Option<Rc<dyn SubmitControl>>,
    transport: Rc<dyn Transport>,
    modals: ModalController,
    text: Text,
}

#[derive(Clone)]
pub struct FormHandler {
    inner: Rc<Inner>,
}

impl FormHandler {
    pub fn new(
        form: Rc<dyn ContactForm>,
        submit: Option<Rc<dyn SubmitControl>>,
        transport: Rc<dyn Transport>,
        modals: ModalController,
        text: Text,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                form,
                submit,
                transport,
                modals,
                text,
            }),
        }
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let Inner {
            form,
            submit,
            transport,
            modals,
            text,
        } = &*self.inner;

        if !form.check_validity() {
            form.report_validity();
            return SubmitOutcome::Invalid;
        }

        let _busy = submit
            .as_ref()
            .map(|control| BusyLabel::engage(control.clone(), text));

        let request = SubmitRequest::new(form.target(), form.serialize());
        log::debug!("Submitting contact form to {}", request.action);

        match transport.send(request).await {
            Ok(response) if response.is_success() => {
                log::info!("Form submit response: {}", response.status);
                modals.show(ModalId::Success);
                form.reset();
                SubmitOutcome::Delivered
            }
            Ok(response) => {
                log::info!("Form submit response: {}", response.status);
                let message =
                    server_message(&response.body).unwrap_or_else(|| text.failure_message.clone());
                modals.set_message(ModalId::Error, &format!("{}{}", text.error_prefix, message));
                modals.show(ModalId::Error);
                SubmitOutcome::Rejected {
                    status: response.status,
                    message,
                }
            }
            Err(e) => {
                log::error!("Error sending form: {}", e);
                modals.set_message(
                    ModalId::Error,
                    &format!("{}{}", text.error_prefix, text.network_error_message),
                );
                modals.show(ModalId::Error);
                SubmitOutcome::Failed(e)
            }
        }
    }
}

/// Disables the submit control for the lifetime of a request and restores it
/// on drop, whichever way the request ends.
struct BusyLabel {
    control: Rc<dyn SubmitControl>,
    original: String,
    fallback: String,
}

impl BusyLabel {
    fn engage(control: Rc<dyn SubmitControl>, text: &Text) -> Self {
        let original = control.label();
        control.set_disabled(true);
        control.set_label(&text.sending_label);
        Self {
            control,
            original,
            fallback: text.default_submit_label.clone(),
        }
    }
}

impl Drop for BusyLabel {
    fn drop(&mut self) {
        self.control.set_disabled(false);
        let label = if self.original.is_empty() {
            &self.fallback
        } else {
            &self.original
        };
        self.control.set_label(label);
    }
}

use futures::future::{FutureExt, LocalBoxFuture};
use gloo_net::http::{Method as HttpMethod, Request};
use web_sys::js_sys::{self, Array};
use web_sys::{FormData, HtmlFormElement};

use super::describe_js;
use crate::error::TransportError;
use crate::form::{
    ContactForm, FormPayload, FormTarget, Method, Serializer, SubmitRequest, SubmitResponse,
    Transport, Validator,
};

pub struct DomForm(HtmlFormElement);

impl DomForm {
    pub fn new(form: HtmlFormElement) -> Self {
        Self(form)
    }
}

impl Validator for DomForm {
    fn check_validity(&self) -> bool {
        self.0.check_validity()
    }

    fn report_validity(&self) {
        let _ = self.0.report_validity();
    }
}

impl Serializer for DomForm {
    /// Collects the form's text entries. File inputs are skipped.
    fn serialize(&self) -> FormPayload {
        let mut payload = FormPayload::default();
        let data = match FormData::new_with_form(&self.0) {
            Ok(data) => data,
            Err(e) => {
                log::warn!("Could not read form fields: {}", describe_js(&e));
                return payload;
            }
        };
        let entries = match js_sys::try_iter(&data) {
            Ok(Some(entries)) => entries,
            _ => return payload,
        };
        for entry in entries.flatten() {
            let pair = Array::from(&entry);
            if let (Some(name), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
                payload.push(name, value);
            }
        }
        payload
    }
}

impl ContactForm for DomForm {
    fn target(&self) -> FormTarget {
        FormTarget {
            action: self.0.action(),
            method: Method::from_attribute(self.0.get_attribute("method").as_deref()),
        }
    }

    fn reset(&self) {
        self.0.reset();
    }
}

/// Sends submissions with `fetch`.
pub struct FetchTransport;

impl Transport for FetchTransport {
    fn send(
        &self,
        request: SubmitRequest,
    ) -> LocalBoxFuture<'static, Result<SubmitResponse, TransportError>> {
        async move {
            let mut outgoing = Request::new(&request.url())
                .method(match request.method {
                    Method::Get => HttpMethod::GET,
                    Method::Post => HttpMethod::POST,
                })
                .header("Accept", request.accept);
            if request.method == Method::Post {
                outgoing = outgoing.body(form_data(&request.payload)?);
            }

            let response = outgoing
                .send()
                .await
                .map_err(|e| TransportError::Send(e.to_string()))?;
            let status = response.status();
            let body = if response.ok() {
                String::new()
            } else {
                response.text().await.unwrap_or_default()
            };
            Ok(SubmitResponse { status, body })
        }
        .boxed_local()
    }
}

fn form_data(payload: &FormPayload) -> Result<FormData, TransportError> {
    let data = FormData::new().map_err(|e| TransportError::Build(describe_js(&e)))?;
    for (name, value) in payload.fields() {
        data.append_with_str(name, value)
            .map_err(|e| TransportError::Build(describe_js(&e)))?;
    }
    Ok(data)
}

use futures::future::LocalBoxFuture;

use crate::error::TransportError;

pub const ACCEPT_JSON: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    /// Reads a form's `method` attribute. Anything other than `get`
    /// (including a missing attribute) submits with POST.
    pub fn from_attribute(attribute: Option<&str>) -> Self {
        match attribute.map(str::trim) {
            Some(method) if method.eq_ignore_ascii_case("get") => Method::Get,
            _ => Method::Post,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// Named text fields in document order. Repeated names are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPayload {
    fields: Vec<(String, String)>,
}

impl FormPayload {
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn to_query_string(&self) -> String {
        self.fields
            .iter()
            .map(|(name, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(name),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl FromIterator<(String, String)> for FormPayload {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormTarget {
    pub action: String,
    pub method: Method,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub action: String,
    pub method: Method,
    pub payload: FormPayload,
    pub accept: &'static str,
}

impl SubmitRequest {
    pub fn new(target: FormTarget, payload: FormPayload) -> Self {
        Self {
            action: target.action,
            method: target.method,
            payload,
            accept: ACCEPT_JSON,
        }
    }

    /// GET carries the fields in the query string; POST sends them as the body.
    pub fn url(&self) -> String {
        match self.method {
            Method::Post => self.action.clone(),
            Method::Get if self.payload.is_empty() => self.action.clone(),
            Method::Get => {
                let separator = if self.action.contains('?') { '&' } else { '?' };
                format!("{}{}{}", self.action, separator, self.payload.to_query_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResponse {
    pub status: u16,
    pub body: String,
}

impl SubmitResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait Validator {
    fn check_validity(&self) -> bool;
    /// Surfaces the native validation UI.
    fn report_validity(&self);
}

pub trait Serializer {
    fn serialize(&self) -> FormPayload;
}

pub trait Transport {
    fn send(&self, request: SubmitRequest)
        -> LocalBoxFuture<'static, Result<SubmitResponse, TransportError>>;
}

pub trait ContactForm: Validator + Serializer {
    fn target(&self) -> FormTarget;
    fn reset(&self);
}

//! HTTP requests as the widget sees them.
//!
//! A [`Transport`] takes a request and a completion callback. The call
//! returns immediately; the callback runs later on the same thread with the
//! response or the failure. Nothing here is `Send`.

use std::fmt;
use thiserror::Error;

/// HTTP method used by the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// List people
    Get,
    /// Create a person
    Post,
    /// Remove a person
    Delete,
}

impl HttpMethod {
    /// Method name as sent on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body, still unencoded for form bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    /// Name/value pairs sent as `application/x-www-form-urlencoded`
    Form(Vec<(String, String)>),
    /// Serialized JSON document
    Json(String),
}

impl RequestBody {
    /// `Content-Type` header value.
    pub const fn content_type(&self) -> &'static str {
        match self {
            Self::Form(_) => "application/x-www-form-urlencoded; charset=UTF-8",
            Self::Json(_) => "application/json",
        }
    }

    /// First value of a form field.
    pub fn form_field(&self, name: &str) -> Option<&str> {
        match self {
            Self::Form(fields) => fields
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            Self::Json(_) => None,
        }
    }
}

/// An outgoing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Method
    pub method: HttpMethod,
    /// Absolute or page-relative URL
    pub url: String,
    /// Body, for POST only
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    /// `GET url`
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            body: None,
        }
    }

    /// `POST url` with a body
    pub fn post(url: impl Into<String>, body: RequestBody) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            body: Some(body),
        }
    }

    /// `DELETE url`
    pub fn delete(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Delete,
            url: url.into(),
            body: None,
        }
    }
}

/// A completed response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code
    pub status: u16,
    /// Body text
    pub body: String,
}

impl HttpResponse {
    /// Response with an explicit status.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// `200 OK` with a body.
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    /// Whether the status is 2xx.
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// The request never produced a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// No `window` to fetch from
    #[error("no browser window available")]
    NoWindow,
    /// The request could not be constructed
    #[error("could not build request: {0}")]
    InvalidRequest(String),
    /// Network failure, CORS rejection, or similar
    #[error("network error: {0}")]
    Network(String),
    /// The response body could not be read
    #[error("could not read response body: {0}")]
    Body(String),
}

/// Callback receiving the outcome of one request.
pub type Completion = Box<dyn FnOnce(Result<HttpResponse, TransportError>)>;

/// Issues HTTP requests without blocking.
pub trait Transport {
    /// Start a request; `on_complete` runs exactly once when it finishes.
    fn send(&self, request: HttpRequest, on_complete: Completion);
}

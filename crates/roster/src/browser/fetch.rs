//! `window.fetch` transport.

use crate::transport::{Completion, HttpRequest, HttpResponse, RequestBody, Transport, TransportError};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Headers, Request, RequestInit, Response, UrlSearchParams};

/// Sends requests with `fetch` and completes them on a local task.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl FetchTransport {
    /// Create the transport.
    pub const fn new() -> Self {
        Self
    }
}

impl Transport for FetchTransport {
    fn send(&self, request: HttpRequest, on_complete: Completion) {
        spawn_local(async move {
            on_complete(fetch(request).await);
        });
    }
}

fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn encode_body(body: &RequestBody) -> Result<String, TransportError> {
    match body {
        RequestBody::Form(fields) => {
            let params = UrlSearchParams::new()
                .map_err(|e| TransportError::InvalidRequest(js_message(&e)))?;
            for (name, value) in fields {
                params.append(name, value);
            }
            Ok(params.to_string().into())
        }
        RequestBody::Json(json) => Ok(json.clone()),
    }
}

fn build_request(request: &HttpRequest) -> Result<Request, TransportError> {
    let invalid = |e: JsValue| TransportError::InvalidRequest(js_message(&e));

    let headers = Headers::new().map_err(invalid)?;
    headers.set("Accept", "application/json").map_err(invalid)?;

    let init = RequestInit::new();
    init.set_method(request.method.as_str());
    if let Some(body) = &request.body {
        headers.set("Content-Type", body.content_type()).map_err(invalid)?;
        init.set_body(&JsValue::from_str(&encode_body(body)?));
    }
    init.set_headers(&headers);

    Request::new_with_str_and_init(&request.url, &init).map_err(invalid)
}

async fn fetch(request: HttpRequest) -> Result<HttpResponse, TransportError> {
    let window = web_sys::window().ok_or(TransportError::NoWindow)?;
    let js_request = build_request(&request)?;

    let value = JsFuture::from(window.fetch_with_request(&js_request))
        .await
        .map_err(|e| TransportError::Network(js_message(&e)))?;
    let response: Response = value
        .dyn_into()
        .map_err(|e| TransportError::Network(js_message(&e)))?;

    let status = response.status();
    let text = response
        .text()
        .map_err(|e| TransportError::Body(js_message(&e)))?;
    let body = JsFuture::from(text)
        .await
        .map_err(|e| TransportError::Body(js_message(&e)))?;

    Ok(HttpResponse::new(status, body.as_string().unwrap_or_default()))
}

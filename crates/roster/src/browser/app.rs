//! WASM application entry point.

use super::console::init_console_logging;
use super::dom::{document, DomMessageLabel, DomRowContainer, DomTextField};
use super::fetch::FetchTransport;
use crate::widget::{OperationFailure, PersonListWidget, WidgetConfiguration};
use roster_core::{BodyEncoding, Person, PersonId};
use roster_yaml::{Manifest, MountConfig};
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// People list mounted on the host page.
#[wasm_bindgen]
pub struct PeopleApp {
    widget: PersonListWidget,
}

#[wasm_bindgen]
impl PeopleApp {
    /// Mount on the elements matched by the three selectors, talking to
    /// `url` with form-encoded create requests.
    #[wasm_bindgen(constructor)]
    pub fn new(
        container: &str,
        url: &str,
        username: &str,
        errors: &str,
    ) -> Result<PeopleApp, JsValue> {
        let manifest = Manifest {
            mount: MountConfig {
                container: container.to_string(),
                username: username.to_string(),
                errors: errors.to_string(),
            },
            ..Manifest::for_base_url(url)
        };
        manifest
            .validate()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Self::mount(&manifest)
    }

    /// Mount from a `roster.yaml` manifest.
    #[wasm_bindgen(js_name = "fromManifest")]
    pub fn from_manifest(yaml: &str) -> Result<PeopleApp, JsValue> {
        let manifest = Manifest::from_yaml(yaml).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Self::mount(&manifest)
    }

    /// Collection URL.
    #[wasm_bindgen(getter, js_name = "baseUrl")]
    pub fn base_url(&self) -> String {
        self.widget.base_url().to_string()
    }

    /// Validate the username input and create a person. Returns whether a
    /// request was sent.
    #[wasm_bindgen(js_name = "submitNewPerson")]
    pub fn submit_new_person(&self) -> bool {
        self.widget.submit_new_person().is_ok()
    }

    /// Create a person without validating.
    #[wasm_bindgen(js_name = "createPerson")]
    pub fn create_person(&self, username: &str) {
        self.widget.create_person(username);
    }

    /// Fetch every person and append their rows.
    #[wasm_bindgen(js_name = "fetchAllPeople")]
    pub fn fetch_all_people(&self) {
        self.widget.fetch_all_people();
    }

    /// Append a row for a person given as JSON.
    #[wasm_bindgen(js_name = "renderPerson")]
    pub fn render_person(&self, json: &str) -> Result<(), JsValue> {
        let person = Person::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.widget.render_person(&person);
        Ok(())
    }

    /// Delete a person by id (number or string).
    #[wasm_bindgen(js_name = "removePerson")]
    pub fn remove_person(&self, id: &JsValue) -> Result<(), JsValue> {
        self.widget.remove_person(&person_id_from_js(id)?);
        Ok(())
    }

    /// Call `callback(operation, message)` whenever create, list or delete
    /// fails.
    #[wasm_bindgen(js_name = "onFailure")]
    pub fn on_failure(&self, callback: js_sys::Function) {
        self.widget.on_failure(move |failure| {
            if let Err(e) = call_failure_callback(&callback, failure) {
                tracing::warn!(
                    operation = %failure.operation,
                    error = ?e,
                    "failure callback threw"
                );
            }
        });
    }
}

impl PeopleApp {
    fn mount(manifest: &Manifest) -> Result<Self, JsValue> {
        init_console_logging(manifest.logging.level);

        let doc = document()?;
        let container = Rc::new(DomRowContainer::query(&doc, &manifest.mount.container)?);
        let username = Rc::new(DomTextField::query(&doc, &manifest.mount.username)?);
        let errors = Rc::new(DomMessageLabel::query(&doc, &manifest.mount.errors)?);

        let config = WidgetConfiguration::new(
            container,
            manifest.endpoint.base_url.clone(),
            username,
            errors,
        )
        .with_encoding(manifest.endpoint.encoding);

        tracing::info!(
            base_url = %manifest.endpoint.base_url,
            json = manifest.endpoint.encoding == BodyEncoding::Json,
            "people widget mounted"
        );

        Ok(Self {
            widget: PersonListWidget::new(config, Rc::new(FetchTransport::new())),
        })
    }

    /// The underlying widget (Rust API).
    pub const fn widget(&self) -> &PersonListWidget {
        &self.widget
    }
}

fn call_failure_callback(
    callback: &js_sys::Function,
    failure: &OperationFailure,
) -> Result<JsValue, JsValue> {
    callback.call2(
        &JsValue::NULL,
        &JsValue::from_str(failure.operation.as_str()),
        &JsValue::from_str(&failure.to_string()),
    )
}

fn person_id_from_js(value: &JsValue) -> Result<PersonId, JsValue> {
    if let Some(n) = value.as_f64() {
        if let Some(id) = PersonId::from_integral_f64(n) {
            return Ok(id);
        }
    } else if let Some(s) = value.as_string() {
        if !s.is_empty() {
            return Ok(PersonId::Text(s));
        }
    }
    Err(JsValue::from_str(
        "person id must be an integer or a non-empty string",
    ))
}

/// Initialize panic hook for better error messages.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportError;
    use crate::widget::{Operation, WidgetError};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn offline() -> OperationFailure {
        OperationFailure {
            operation: Operation::List,
            person_id: None,
            error: WidgetError::Transport(TransportError::Network("offline".into())),
        }
    }

    #[wasm_bindgen_test]
    fn test_failure_callback_receives_operation_and_message() {
        let callback = js_sys::Function::new_with_args("op, msg", "return op + '|' + msg;");
        let result = call_failure_callback(&callback, &offline()).expect("callback returns");
        let text = result.as_string().expect("string result");
        assert!(text.starts_with("list|"));
        assert!(text.contains("offline"));
    }

    #[wasm_bindgen_test]
    fn test_throwing_failure_callback_is_reported() {
        let callback = js_sys::Function::new_with_args("op, msg", "throw new Error('boom');");
        assert!(call_failure_callback(&callback, &offline()).is_err());
    }

    #[wasm_bindgen_test]
    fn test_person_id_from_js() {
        assert_eq!(person_id_from_js(&JsValue::from(3)).ok(), Some(PersonId::Unsigned(3)));
        assert_eq!(person_id_from_js(&JsValue::from(-2)).ok(), Some(PersonId::Signed(-2)));
        assert_eq!(
            person_id_from_js(&JsValue::from_str("abc")).ok(),
            Some(PersonId::Text("abc".into()))
        );
        assert!(person_id_from_js(&JsValue::from(1.5)).is_err());
        assert!(person_id_from_js(&JsValue::from_str("")).is_err());
    }
}

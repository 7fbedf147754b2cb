//! Test harness for the people widget.

use roster::memory::{MemoryMessageLabel, MemoryRowContainer, MemoryTextField, MemoryTransport};
use roster::{
    row_element_id, BodyEncoding, HttpRequest, MessageSurface, Operation, OperationFailure,
    PersonId, PersonListWidget, PersonRow, TextField, TransportError, ValidationError,
    WidgetConfiguration,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Collection URL the harness mounts against unless told otherwise.
pub const DEFAULT_URL: &str = "http://localhost:8000/people";

/// A widget mounted on in-memory surfaces, driven by hand.
///
/// Requests stay pending until the test answers them with
/// [`respond`](Self::respond) and friends.
pub struct Harness {
    widget: PersonListWidget,
    rows: Rc<MemoryRowContainer>,
    username: Rc<MemoryTextField>,
    errors: Rc<MemoryMessageLabel>,
    transport: Rc<MemoryTransport>,
    failures: Rc<RefCell<Vec<(Operation, String)>>>,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

impl Harness {
    /// Mount against [`DEFAULT_URL`] with form-encoded creates.
    pub fn new() -> Self {
        Self::with_config(DEFAULT_URL, BodyEncoding::Form)
    }

    /// Mount against another collection URL.
    pub fn with_url(url: &str) -> Self {
        Self::with_config(url, BodyEncoding::Form)
    }

    /// Mount with JSON-encoded creates.
    pub fn json() -> Self {
        Self::with_config(DEFAULT_URL, BodyEncoding::Json)
    }

    fn with_config(url: &str, encoding: BodyEncoding) -> Self {
        let rows = Rc::new(MemoryRowContainer::new());
        let username = Rc::new(MemoryTextField::default());
        let errors = Rc::new(MemoryMessageLabel::default());
        let transport = Rc::new(MemoryTransport::new());

        let config = WidgetConfiguration::new(rows.clone(), url, username.clone(), errors.clone())
            .with_encoding(encoding);
        let widget = PersonListWidget::new(config, transport.clone());

        let failures = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&failures);
        widget.on_failure(move |failure: &OperationFailure| {
            log.borrow_mut()
                .push((failure.operation, failure.to_string()));
        });

        Self {
            widget,
            rows,
            username,
            errors,
            transport,
            failures,
        }
    }

    // === Access ===

    /// The widget under test.
    pub const fn widget(&self) -> &PersonListWidget {
        &self.widget
    }

    /// The row container.
    pub fn rows(&self) -> &MemoryRowContainer {
        &self.rows
    }

    /// The transport.
    pub fn transport(&self) -> &MemoryTransport {
        &self.transport
    }

    // === Actions ===

    /// Replace the username input's value.
    pub fn type_username(&self, value: &str) -> &Self {
        self.username.set_value(value);
        self
    }

    /// Submit the new-person form.
    pub fn submit(&self) -> Result<(), ValidationError> {
        self.widget.submit_new_person()
    }

    /// Click the delete control of the first row for `id`. Returns `false`
    /// when there is no such row.
    pub fn click_delete(&self, id: impl Into<PersonId>) -> bool {
        self.rows.activate_delete(&row_element_id(&id.into()))
    }

    /// Answer the oldest pending request.
    ///
    /// # Panics
    ///
    /// Panics if nothing is pending.
    pub fn respond(&self, status: u16, body: &str) -> HttpRequest {
        self.transport
            .respond(status, body)
            .expect("no pending request to respond to")
    }

    /// Answer the oldest pending request with `200` and a JSON value.
    ///
    /// # Panics
    ///
    /// Panics if nothing is pending.
    pub fn respond_json(&self, body: &serde_json::Value) -> HttpRequest {
        self.transport
            .respond_json(body)
            .expect("no pending request to respond to")
    }

    /// Fail the oldest pending request at the network level.
    ///
    /// # Panics
    ///
    /// Panics if nothing is pending.
    pub fn fail_network(&self, message: &str) -> HttpRequest {
        self.transport
            .fail_next(TransportError::Network(message.to_string()))
            .expect("no pending request to fail")
    }

    // === Queries ===

    /// Current username input value.
    pub fn username_value(&self) -> String {
        self.username.value()
    }

    /// Current validation message.
    pub fn error_text(&self) -> String {
        self.errors.text()
    }

    /// Element ids of the rendered rows, in order.
    pub fn row_ids(&self) -> Vec<String> {
        self.rows.element_ids()
    }

    /// First row for `id`.
    pub fn row(&self, id: impl Into<PersonId>) -> Option<PersonRow> {
        self.rows.find(&row_element_id(&id.into()))
    }

    /// Requests sent so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.transport.requests()
    }

    /// Failures reported so far, as operation and message.
    pub fn failures(&self) -> Vec<(Operation, String)> {
        self.failures.borrow().clone()
    }

    // === Assertions ===

    /// Assert that a row for `id` shows exactly `id_text` and `username`.
    ///
    /// # Panics
    ///
    /// Panics if the row is missing or its cells differ.
    pub fn assert_row(&self, id: impl Into<PersonId>, id_text: &str, username: &str) {
        let id = id.into();
        let row = self
            .row(id.clone())
            .unwrap_or_else(|| panic!("no row for person {id}; rows are {:?}", self.row_ids()));
        assert_eq!(
            row.cell_texts(),
            [id_text, username, roster::DELETE_LABEL],
            "cells of row for person {id}"
        );
    }

    /// Assert that nothing was sent.
    ///
    /// # Panics
    ///
    /// Panics if any request was sent.
    pub fn assert_no_requests(&self) {
        let sent = self.requests();
        assert!(sent.is_empty(), "expected no requests, got {sent:?}");
    }

    /// Assert that no failure was reported.
    ///
    /// # Panics
    ///
    /// Panics if any failure was reported.
    pub fn assert_no_failures(&self) {
        let failures = self.failures();
        assert!(failures.is_empty(), "expected no failures, got {failures:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster::HttpMethod;
    use serde_json::json;

    #[test]
    fn test_harness_starts_empty() {
        let h = Harness::new();
        assert!(h.row_ids().is_empty());
        assert_eq!(h.username_value(), "");
        assert_eq!(h.error_text(), "");
        h.assert_no_requests();
        h.assert_no_failures();
        assert_eq!(h.widget().base_url(), DEFAULT_URL);
    }

    #[test]
    fn test_create_round_trip() {
        let h = Harness::new();
        h.type_username("foo");
        assert!(h.submit().is_ok());

        let request = h.respond_json(&json!({"id": 1, "username": "foo"}));
        assert_eq!(request.method, HttpMethod::Post);
        h.assert_row(1u64, "1", "foo");
        assert_eq!(h.username_value(), "");
    }

    #[test]
    fn test_click_delete_sends_request() {
        let h = Harness::with_url("http://example.test/people/");
        h.widget()
            .render_person(&roster::Person::new(5u64, "bob").expect("valid person"));
        assert!(h.click_delete(5u64));
        assert!(!h.click_delete(6u64));

        let request = h.respond(204, "");
        assert_eq!(request.url, "http://example.test/people/5");
        assert!(h.row_ids().is_empty());
    }

    #[test]
    fn test_failures_are_logged() {
        let h = Harness::new();
        h.widget().fetch_all_people();
        h.fail_network("offline");
        let failures = h.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, Operation::List);
        assert!(failures[0].1.contains("offline"));
    }

    #[test]
    fn test_json_encoding() {
        let h = Harness::json();
        h.widget().create_person("zed");
        let request = h.transport().last_request().expect("request sent");
        assert_eq!(
            request.body.map(|b| b.content_type()),
            Some("application/json")
        );
    }
}

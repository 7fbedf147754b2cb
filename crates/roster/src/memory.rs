//! In-memory surfaces and transport.
//!
//! These back the widget outside a browser. The transport never answers on
//! its own: a caller completes each pending request explicitly, in whatever
//! order it likes, which is how out-of-order completions get exercised.

use crate::surface::{DeleteHandler, MessageSurface, RowContainer, TextField};
use crate::transport::{Completion, HttpRequest, HttpResponse, Transport, TransportError};
use roster_core::PersonRow;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

struct MountedRow {
    row: PersonRow,
    on_delete: DeleteHandler,
}

/// Row container backed by a `Vec`.
#[derive(Default)]
pub struct MemoryRowContainer {
    rows: RefCell<Vec<MountedRow>>,
}

impl MemoryRowContainer {
    /// Create an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.borrow().len()
    }

    /// Whether there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the rows in display order.
    #[must_use]
    pub fn rows(&self) -> Vec<PersonRow> {
        self.rows.borrow().iter().map(|m| m.row.clone()).collect()
    }

    /// Element ids in display order.
    #[must_use]
    pub fn element_ids(&self) -> Vec<String> {
        self.rows
            .borrow()
            .iter()
            .map(|m| m.row.element_id().to_string())
            .collect()
    }

    /// First row with the given element id.
    #[must_use]
    pub fn find(&self, element_id: &str) -> Option<PersonRow> {
        self.rows
            .borrow()
            .iter()
            .find(|m| m.row.element_id() == element_id)
            .map(|m| m.row.clone())
    }

    /// Number of rows with the given element id.
    #[must_use]
    pub fn count(&self, element_id: &str) -> usize {
        self.rows
            .borrow()
            .iter()
            .filter(|m| m.row.element_id() == element_id)
            .count()
    }

    /// Mount a row whose delete control does nothing, as if the host page
    /// had rendered it.
    pub fn insert_static_row(&self, row: PersonRow) {
        self.rows.borrow_mut().push(MountedRow {
            row,
            on_delete: Rc::new(|| {}),
        });
    }

    /// Activate the delete control of the first row with the given element
    /// id. Returns `false` when no such row exists.
    pub fn activate_delete(&self, element_id: &str) -> bool {
        let handler = self
            .rows
            .borrow()
            .iter()
            .find(|m| m.row.element_id() == element_id)
            .map(|m| Rc::clone(&m.on_delete));
        match handler {
            Some(on_delete) => {
                on_delete();
                true
            }
            None => false,
        }
    }

    /// Rows serialized as table body HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        self.rows
            .borrow()
            .iter()
            .map(|m| m.row.to_html())
            .collect()
    }
}

impl RowContainer for MemoryRowContainer {
    fn append_row(&self, row: &PersonRow, on_delete: DeleteHandler) {
        self.rows.borrow_mut().push(MountedRow {
            row: row.clone(),
            on_delete,
        });
    }

    fn remove_rows(&self, element_id: &str) -> usize {
        let mut rows = self.rows.borrow_mut();
        let before = rows.len();
        rows.retain(|m| m.row.element_id() != element_id);
        before - rows.len()
    }
}

/// Text input backed by a `String`.
#[derive(Debug, Default)]
pub struct MemoryTextField {
    value: RefCell<String>,
}

impl MemoryTextField {
    /// Create a field with an initial value.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: RefCell::new(value.into()),
        }
    }
}

impl TextField for MemoryTextField {
    fn value(&self) -> String {
        self.value.borrow().clone()
    }

    fn set_value(&self, value: &str) {
        *self.value.borrow_mut() = value.to_string();
    }
}

/// Message label backed by a `String`.
#[derive(Debug, Default)]
pub struct MemoryMessageLabel {
    text: RefCell<String>,
}

impl MemoryMessageLabel {
    /// Create a label with initial text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: RefCell::new(text.into()),
        }
    }
}

impl MessageSurface for MemoryMessageLabel {
    fn text(&self) -> String {
        self.text.borrow().clone()
    }

    fn set_text(&self, text: &str) {
        *self.text.borrow_mut() = text.to_string();
    }
}

struct PendingRequest {
    request: HttpRequest,
    on_complete: Completion,
}

/// Transport that records requests and completes them on demand.
#[derive(Default)]
pub struct MemoryTransport {
    sent: RefCell<Vec<HttpRequest>>,
    pending: RefCell<VecDeque<PendingRequest>>,
}

impl MemoryTransport {
    /// Create a transport with nothing in flight.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request sent so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.sent.borrow().clone()
    }

    /// The most recent request.
    #[must_use]
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.sent.borrow().last().cloned()
    }

    /// Requests still waiting for completion, oldest first.
    #[must_use]
    pub fn pending(&self) -> Vec<HttpRequest> {
        self.pending
            .borrow()
            .iter()
            .map(|p| p.request.clone())
            .collect()
    }

    /// Number of requests waiting for completion.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Complete the pending request at `index` (0 is the oldest).
    ///
    /// Returns the completed request, or `None` if there is no such index.
    pub fn complete(
        &self,
        index: usize,
        outcome: Result<HttpResponse, TransportError>,
    ) -> Option<HttpRequest> {
        // Released before the callback runs: completions may send again.
        let pending = self.pending.borrow_mut().remove(index)?;
        (pending.on_complete)(outcome);
        Some(pending.request)
    }

    /// Complete the oldest pending request.
    pub fn complete_next(
        &self,
        outcome: Result<HttpResponse, TransportError>,
    ) -> Option<HttpRequest> {
        self.complete(0, outcome)
    }

    /// Answer the oldest pending request with a status and body.
    pub fn respond(&self, status: u16, body: impl Into<String>) -> Option<HttpRequest> {
        self.complete_next(Ok(HttpResponse::new(status, body)))
    }

    /// Answer the oldest pending request with `200` and a JSON value.
    pub fn respond_json(&self, body: &serde_json::Value) -> Option<HttpRequest> {
        self.respond(200, body.to_string())
    }

    /// Fail the oldest pending request.
    pub fn fail_next(&self, error: TransportError) -> Option<HttpRequest> {
        self.complete_next(Err(error))
    }
}

impl Transport for MemoryTransport {
    fn send(&self, request: HttpRequest, on_complete: Completion) {
        self.sent.borrow_mut().push(request.clone());
        self.pending.borrow_mut().push_back(PendingRequest {
            request,
            on_complete,
        });
    }
}

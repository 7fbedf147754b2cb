//! The people list widget.
//!
//! `PersonListWidget` is a stateless façade over three independent
//! request/response cycles (create, list, delete) plus row rendering. It is
//! a cheap `Rc` handle: clones share the same configuration and failure
//! handlers, and completion callbacks capture a clone.
//!
//! # Example
//!
//! ```
//! use roster::memory::{MemoryMessageLabel, MemoryRowContainer, MemoryTextField, MemoryTransport};
//! use roster::{PersonListWidget, WidgetConfiguration};
//! use std::rc::Rc;
//!
//! let rows = Rc::new(MemoryRowContainer::new());
//! let transport = Rc::new(MemoryTransport::new());
//! let widget = PersonListWidget::new(
//!     WidgetConfiguration::new(
//!         rows.clone(),
//!         "http://localhost:8000/people",
//!         Rc::new(MemoryTextField::default()),
//!         Rc::new(MemoryMessageLabel::default()),
//!     ),
//!     transport.clone(),
//! );
//!
//! widget.fetch_all_people();
//! transport.respond(200, r#"[{"id":1,"username":"foo"}]"#);
//! assert_eq!(rows.element_ids(), vec!["person_1"]);
//! ```

use crate::surface::{DeleteHandler, MessageSurface, RowContainer, TextField};
use crate::transport::{
    HttpMethod, HttpRequest, HttpResponse, RequestBody, Transport, TransportError,
};
use roster_core::{
    people_from_json, row_element_id, validate_username, BodyEncoding, NewPerson, Person,
    PersonError, PersonId, PersonRow, ValidationError,
};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use thiserror::Error;
use tracing::{debug, warn};

/// Constructor-time bundle of the surfaces and endpoint the widget uses.
#[derive(Clone)]
pub struct WidgetConfiguration {
    /// Where rows are appended
    pub container: Rc<dyn RowContainer>,
    /// Collection URL
    pub base_url: String,
    /// New-person username input
    pub username: Rc<dyn TextField>,
    /// Validation message display
    pub errors: Rc<dyn MessageSurface>,
    /// Create request body encoding
    pub encoding: BodyEncoding,
}

impl WidgetConfiguration {
    /// Bundle the four collaborators, with form-encoded create requests.
    pub fn new(
        container: Rc<dyn RowContainer>,
        base_url: impl Into<String>,
        username: Rc<dyn TextField>,
        errors: Rc<dyn MessageSurface>,
    ) -> Self {
        Self {
            container,
            base_url: base_url.into(),
            username,
            errors,
            encoding: BodyEncoding::default(),
        }
    }

    /// Use a different create request body encoding.
    #[must_use]
    pub fn with_encoding(mut self, encoding: BodyEncoding) -> Self {
        self.encoding = encoding;
        self
    }
}

impl fmt::Debug for WidgetConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetConfiguration")
            .field("base_url", &self.base_url)
            .field("encoding", &self.encoding)
            .finish_non_exhaustive()
    }
}

/// The network operation a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `POST <base>`
    Create,
    /// `GET <base>`
    List,
    /// `DELETE <base>/<id>`
    Delete,
}

impl Operation {
    /// Lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::List => "list",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a network operation failed.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// No response at all
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// Non-2xx status
    #[error("{method} {url} answered with status {status}")]
    Status {
        /// Request method
        method: HttpMethod,
        /// Request URL
        url: String,
        /// Response status
        status: u16,
    },
    /// 2xx but the body was not the expected person(s)
    #[error("unexpected response body: {0}")]
    Decode(#[from] PersonError),
}

/// A failed operation, as delivered to [`PersonListWidget::on_failure`]
/// handlers.
#[derive(Debug)]
pub struct OperationFailure {
    /// Which operation failed
    pub operation: Operation,
    /// Person the operation targeted, for deletes
    pub person_id: Option<PersonId>,
    /// What went wrong
    pub error: WidgetError,
}

impl fmt::Display for OperationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.person_id {
            Some(id) => write!(f, "{} of person {id} failed: {}", self.operation, self.error),
            None => write!(f, "{} failed: {}", self.operation, self.error),
        }
    }
}

impl std::error::Error for OperationFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

type FailureHandler = Rc<dyn Fn(&OperationFailure)>;

struct WidgetInner {
    config: WidgetConfiguration,
    transport: Rc<dyn Transport>,
    failure_handlers: RefCell<Vec<FailureHandler>>,
}

/// Lists, adds and deletes people against a REST collection.
#[derive(Clone)]
pub struct PersonListWidget {
    inner: Rc<WidgetInner>,
}

impl fmt::Debug for PersonListWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersonListWidget")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl PersonListWidget {
    /// Create a widget over the given surfaces and transport.
    pub fn new(config: WidgetConfiguration, transport: Rc<dyn Transport>) -> Self {
        Self {
            inner: Rc::new(WidgetInner {
                config,
                transport,
                failure_handlers: RefCell::new(Vec::new()),
            }),
        }
    }

    /// The configuration the widget was built with.
    pub fn config(&self) -> &WidgetConfiguration {
        &self.inner.config
    }

    /// Collection URL.
    pub fn base_url(&self) -> &str {
        &self.inner.config.base_url
    }

    /// Register a handler for failed create, list and delete operations.
    ///
    /// Handlers run in registration order, once per failure. A handler
    /// registered while a failure is being delivered first runs on the next
    /// failure.
    pub fn on_failure<F>(&self, handler: F)
    where
        F: Fn(&OperationFailure) + 'static,
    {
        self.inner.failure_handlers.borrow_mut().push(Rc::new(handler));
    }

    /// Validate the username input and create a person from it.
    ///
    /// An empty or whitespace-only value writes the validation message to
    /// the error surface and sends nothing.
    pub fn submit_new_person(&self) -> Result<(), ValidationError> {
        let config = &self.inner.config;
        let username = config.username.value();
        if let Err(e) = validate_username(&username).into_result() {
            config.errors.set_text(e.message());
            return Err(e);
        }
        config.errors.set_text("");
        self.create_person(&username);
        Ok(())
    }

    /// `POST` a new person; on success render it and clear the input.
    pub fn create_person(&self, username: &str) {
        let payload = NewPerson::new(username);
        let body = match self.inner.config.encoding {
            BodyEncoding::Form => RequestBody::Form(payload.form_fields()),
            BodyEncoding::Json => match payload.to_json() {
                Ok(json) => RequestBody::Json(json),
                Err(e) => {
                    self.fail(Operation::Create, None, e.into());
                    return;
                }
            },
        };
        let request = HttpRequest::post(self.base_url(), body);
        let widget = self.clone();
        self.send(request, move |response| {
            widget.finish_create(response);
        });
    }

    fn finish_create(&self, response: Result<HttpResponse, WidgetError>) {
        let person = response.and_then(|r| Ok(Person::from_json(&r.body)?));
        match person {
            Ok(person) => {
                self.render_person(&person);
                self.inner.config.username.set_value("");
            }
            Err(e) => self.fail(Operation::Create, None, e),
        }
    }

    /// Append one row for a person.
    ///
    /// Never deduplicates: rendering the same person twice gives two rows
    /// with the same element id. The row's delete control calls
    /// [`remove_person`](Self::remove_person) on this widget.
    pub fn render_person(&self, person: &Person) {
        let row = PersonRow::for_person(person);
        self.inner
            .config
            .container
            .append_row(&row, self.delete_handler(person.id.clone()));
    }

    /// Render each person in order.
    pub fn render_people(&self, people: &[Person]) {
        for person in people {
            self.render_person(person);
        }
        debug!(count = people.len(), "rendered people");
    }

    fn delete_handler(&self, id: PersonId) -> DeleteHandler {
        let widget: Weak<WidgetInner> = Rc::downgrade(&self.inner);
        Rc::new(move || {
            if let Some(inner) = widget.upgrade() {
                Self { inner }.remove_person(&id);
            }
        })
    }

    /// `GET` every person and append a row for each, in response order.
    ///
    /// Existing rows are left alone.
    pub fn fetch_all_people(&self) {
        let request = HttpRequest::get(self.base_url());
        let widget = self.clone();
        self.send(request, move |response| {
            widget.finish_fetch_all(response);
        });
    }

    fn finish_fetch_all(&self, response: Result<HttpResponse, WidgetError>) {
        match response.and_then(|r| Ok(people_from_json(&r.body)?)) {
            Ok(people) => self.render_people(&people),
            Err(e) => self.fail(Operation::List, None, e),
        }
    }

    /// `DELETE` a person; on success remove its row(s) from the container.
    ///
    /// A missing row is not an error.
    pub fn remove_person(&self, id: &PersonId) {
        let request = HttpRequest::delete(self.person_url(id));
        let widget = self.clone();
        let id = id.clone();
        self.send(request, move |response| match response {
            Ok(_) => widget.remove_row(&id),
            Err(e) => widget.fail(Operation::Delete, Some(id), e),
        });
    }

    fn remove_row(&self, id: &PersonId) {
        let element_id = row_element_id(id);
        let removed = self.inner.config.container.remove_rows(&element_id);
        debug!(%element_id, removed, "removed person row");
    }

    fn person_url(&self, id: &PersonId) -> String {
        format!("{}/{id}", self.base_url().trim_end_matches('/'))
    }

    fn send<F>(&self, request: HttpRequest, on_response: F)
    where
        F: FnOnce(Result<HttpResponse, WidgetError>) + 'static,
    {
        debug!(method = %request.method, url = %request.url, "sending request");
        let method = request.method;
        let url = request.url.clone();
        self.inner.transport.send(
            request,
            Box::new(move |outcome| {
                let checked = outcome.map_err(WidgetError::from).and_then(|response| {
                    if response.is_success() {
                        Ok(response)
                    } else {
                        Err(WidgetError::Status {
                            method,
                            url,
                            status: response.status,
                        })
                    }
                });
                on_response(checked);
            }),
        );
    }

    fn fail(&self, operation: Operation, person_id: Option<PersonId>, error: WidgetError) {
        let failure = OperationFailure {
            operation,
            person_id,
            error,
        };
        warn!(%operation, error = %failure.error, "{failure}");
        let handlers: Vec<FailureHandler> = self.inner.failure_handlers.borrow().clone();
        for handler in &handlers {
            handler(&failure);
        }
    }
}

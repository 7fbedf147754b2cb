//! Roster: a WASM-first people list widget.
//!
//! Lists people fetched from a REST collection, adds a person from a form
//! field, and deletes a person from the list.
//!
//! # Browser Usage (WASM)
//!
//! ```javascript
//! import init, { PeopleApp } from './roster.js';
//!
//! async function main() {
//!     await init();
//!     const app = new PeopleApp('#people > tbody', '/people', '#username', '#errors');
//!     app.onFailure((operation, message) => console.warn(operation, message));
//!     app.fetchAllPeople();
//!     document.querySelector('#add').onclick = () => app.submitNewPerson();
//! }
//! ```
//!
//! Outside the browser the same widget runs over the in-memory surfaces and
//! transport in [`memory`].

pub use roster_core::*;
pub use roster_yaml as yaml;

pub mod browser;
pub mod logging;
pub mod memory;
pub mod surface;
pub mod transport;
mod widget;

pub use surface::{DeleteHandler, MessageSurface, RowContainer, TextField};
pub use transport::{
    Completion, HttpMethod, HttpRequest, HttpResponse, RequestBody, Transport, TransportError,
};
pub use widget::{
    Operation, OperationFailure, PersonListWidget, WidgetConfiguration, WidgetError,
};

#[cfg(target_arch = "wasm32")]
pub use browser::PeopleApp;

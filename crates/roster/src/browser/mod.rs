//! Browser runtime for the people widget.
//!
//! This module binds the widget's surfaces to real DOM elements, its
//! transport to `window.fetch`, and its logs to the browser console.

#[cfg(target_arch = "wasm32")]
pub mod app;
#[cfg(target_arch = "wasm32")]
pub mod console;
#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod fetch;

#[cfg(target_arch = "wasm32")]
pub use app::PeopleApp;
#[cfg(target_arch = "wasm32")]
pub use console::{init_console_logging, ConsoleMakeWriter};
#[cfg(target_arch = "wasm32")]
pub use dom::{document, DomError, DomMessageLabel, DomRowContainer, DomTextField};
#[cfg(target_arch = "wasm32")]
pub use fetch::FetchTransport;

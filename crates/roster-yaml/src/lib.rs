//! YAML manifest parser for the Roster people widget.
//!
//! A manifest tells the browser entry point where the people endpoint lives,
//! which page elements to mount on, and how loud to log.

mod error;
mod manifest;

pub use error::ManifestError;
pub use manifest::{EndpointConfig, LogLevel, LoggingConfig, Manifest, MountConfig};

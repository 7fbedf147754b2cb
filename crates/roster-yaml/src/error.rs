//! Error types for manifest parsing.

use thiserror::Error;

/// Error type for manifest parsing.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// Field path, e.g. `endpoint.base_url`
        field: &'static str,
        /// Error message
        message: String,
    },
}

impl ManifestError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            message: message.into(),
        }
    }
}

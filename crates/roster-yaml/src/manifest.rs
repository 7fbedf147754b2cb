//! Manifest types loaded from `roster.yaml`.

use crate::error::ManifestError;
use roster_core::BodyEncoding;
use serde::{Deserialize, Serialize};

/// Widget manifest.
///
/// ```yaml
/// endpoint:
///   base_url: http://localhost:8000/people
///   encoding: form
/// mount:
///   container: "#people > tbody"
///   username: "#username"
///   errors: "#errors"
/// logging:
///   level: info
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// People endpoint
    pub endpoint: EndpointConfig,
    /// Page elements the widget mounts on
    #[serde(default)]
    pub mount: MountConfig,
    /// Console logging
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// People endpoint configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Collection URL; create and list hit it directly, delete appends `/<id>`
    pub base_url: String,
    /// Create request body encoding
    #[serde(default)]
    pub encoding: BodyEncoding,
}

/// CSS selectors of the host page elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountConfig {
    /// Table body receiving rows
    #[serde(default = "default_container")]
    pub container: String,
    /// Username text input
    #[serde(default = "default_username")]
    pub username: String,
    /// Error message element
    #[serde(default = "default_errors")]
    pub errors: String,
}

fn default_container() -> String {
    "#people > tbody".to_string()
}

fn default_username() -> String {
    "#username".to_string()
}

fn default_errors() -> String {
    "#errors".to_string()
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            container: default_container(),
            username: default_username(),
            errors: default_errors(),
        }
    }
}

/// Log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything
    Trace,
    /// Requests and renders
    Debug,
    /// Lifecycle
    #[default]
    Info,
    /// Failed requests
    Warn,
    /// Errors only
    Error,
}

/// Console logging configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Maximum level written to the console
    #[serde(default)]
    pub level: LogLevel,
}

impl Manifest {
    /// Manifest with default mount points and logging for an endpoint.
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        Self {
            endpoint: EndpointConfig {
                base_url: base_url.into(),
                encoding: BodyEncoding::default(),
            },
            mount: MountConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Parse and validate a manifest.
    pub fn from_yaml(yaml: &str) -> Result<Self, ManifestError> {
        let manifest: Self = serde_yaml_ng::from_str(yaml)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Serialize back to YAML.
    pub fn to_yaml(&self) -> Result<String, ManifestError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check values serde cannot.
    pub fn validate(&self) -> Result<(), ManifestError> {
        let url = self.endpoint.base_url.trim();
        if url.is_empty() {
            return Err(ManifestError::invalid("endpoint.base_url", "must not be empty"));
        }
        if !(url.starts_with("http://") || url.starts_with("https://") || url.starts_with('/')) {
            return Err(ManifestError::invalid(
                "endpoint.base_url",
                format!("'{url}' is neither an http(s) URL nor an absolute path"),
            ));
        }

        for (field, selector) in [
            ("mount.container", &self.mount.container),
            ("mount.username", &self.mount.username),
            ("mount.errors", &self.mount.errors),
        ] {
            if selector.trim().is_empty() {
                return Err(ManifestError::invalid(field, "selector must not be empty"));
            }
        }
        Ok(())
    }
}

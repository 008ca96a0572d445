//! Layered error definitions
//!
//! Categorized by source: config / rig / host

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum HarnessError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Rig Errors =====
    /// Required rig geometry is absent (fatal at run start)
    #[error("missing rig geometry: {what}")]
    MissingRig { what: String },

    /// A wheel mount referenced a slot the rig does not provide
    #[error("rig has no wheel mounted at slot '{slot}'")]
    MissingWheel { slot: String },

    // ===== Host Errors =====
    /// Physics host refused or failed an operation
    #[error("host error: {message}")]
    Host { message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl HarnessError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create missing-rig error
    pub fn missing_rig(what: impl Into<String>) -> Self {
        Self::MissingRig { what: what.into() }
    }

    /// Create host error
    pub fn host(message: impl Into<String>) -> Self {
        Self::Host {
            message: message.into(),
        }
    }
}

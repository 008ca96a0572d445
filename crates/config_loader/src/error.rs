//! Loader error types

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors produced while loading or validating a plan
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Plan file could not be read or written
    #[error("failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Plan content did not parse
    #[error("plan parse error: {message}")]
    Parse { message: String },

    /// File extension did not map to a known format
    #[error("unsupported plan format: .{extension}")]
    UnsupportedFormat { extension: String },

    /// A hard validation rule failed
    #[error("plan validation error at '{field}': {message}")]
    Validation { field: String, message: String },
}

impl ConfigError {
    /// Create an IO error tagged with the path
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

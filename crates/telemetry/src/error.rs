//! Telemetry error types

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Telemetry-specific errors
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Series length integrity violation, detected before export writes
    /// anything
    #[error(
        "telemetry series length mismatch: '{series}' holds {actual} samples, time holds {expected}"
    )]
    LengthMismatch {
        series: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Destination could not be created or written
    #[error("failed to write telemetry to '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TelemetryError {
    /// Create a length mismatch error
    pub fn length_mismatch(series: &'static str, expected: usize, actual: usize) -> Self {
        Self::LengthMismatch {
            series,
            expected,
            actual,
        }
    }

    /// Create an IO error tagged with the destination path
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

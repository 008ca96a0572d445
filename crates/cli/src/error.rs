//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
#[allow(dead_code)]
#[derive(Error, Debug)]
pub enum CliError {
    /// Plan file not found
    #[error("Maneuver plan not found: {path}")]
    PlanNotFound { path: String },

    /// Plan parsing error
    #[error("Failed to parse maneuver plan: {message}")]
    PlanParse { message: String },

    /// Plan validation error
    #[error("Maneuver plan validation failed: {message}")]
    PlanValidation { message: String },

    /// Harness execution error
    #[error("Harness execution failed: {message}")]
    HarnessExecution { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[allow(dead_code)]
impl CliError {
    pub fn plan_not_found(path: impl Into<String>) -> Self {
        Self::PlanNotFound { path: path.into() }
    }

    pub fn plan_validation(message: impl Into<String>) -> Self {
        Self::PlanValidation {
            message: message.into(),
        }
    }

    pub fn harness_execution(message: impl Into<String>) -> Self {
        Self::HarnessExecution {
            message: message.into(),
        }
    }

    /// Process exit code for this error
    ///
    /// Configuration problems exit with 2, runtime failures with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::PlanNotFound { .. } | Self::PlanParse { .. } | Self::PlanValidation { .. } => 2,
            Self::HarnessExecution { .. } | Self::Io(_) => 1,
        }
    }
}

/// Map an anyhow error chain to a process exit code
pub fn exit_code_for(error: &anyhow::Error) -> i32 {
    if let Some(cli) = error.downcast_ref::<CliError>() {
        return cli.exit_code();
    }
    if error.downcast_ref::<config_loader::ConfigError>().is_some() {
        return 2;
    }
    if let Some(harness) = error.downcast_ref::<contracts::HarnessError>() {
        use contracts::HarnessError;
        return match harness {
            HarnessError::ConfigParse { .. }
            | HarnessError::ConfigValidation { .. }
            | HarnessError::MissingRig { .. }
            | HarnessError::MissingWheel { .. } => 2,
            _ => 1,
        };
    }
    1
}

//! Sequencer error types

use contracts::HarnessError;
use telemetry::TelemetryError;
use thiserror::Error;

/// Errors surfaced by the maneuver sequencer
#[derive(Debug, Error)]
pub enum SequencerError {
    /// The plan carried no configurations at all
    #[error("maneuver schedule is empty")]
    EmptySchedule,

    /// `start_at` was handed an index past the end of the schedule
    #[error("configuration index {index} out of range (schedule holds {len})")]
    ConfigIndexOutOfRange { index: usize, len: usize },

    /// The physics host refused an operation (missing rig geometry is the
    /// usual cause, fatal at run start)
    #[error(transparent)]
    Host(#[from] HarnessError),

    /// Telemetry export failed at the REST→END transition
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
}

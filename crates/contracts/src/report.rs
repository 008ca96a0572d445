//! RunReport - Sequencer output
//!
//! Completion record for a single maneuver run.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::WeightVariant;

/// Per-run completion record
///
/// Produced by the sequencer at the REST→END transition, after the telemetry
/// export succeeded. Consumed by observability aggregation and the CLI
/// summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Index of the configuration in the plan
    pub config_index: usize,

    /// Configuration name (may be empty)
    pub config_name: String,

    /// Weight variant the run used
    pub weight_variant: WeightVariant,

    /// Target speed the acceleration phase aimed for (km/h)
    pub init_speed: f64,

    /// Telemetry samples exported
    pub samples: usize,

    /// Phase transitions observed during the run (N turns give N+3)
    pub transitions: u64,

    /// Simulated duration of the run (seconds)
    pub sim_duration: f64,

    /// Highest recorded speed (km/h)
    pub peak_speed: f64,

    /// Path the telemetry CSV was written to
    pub csv_path: PathBuf,
}

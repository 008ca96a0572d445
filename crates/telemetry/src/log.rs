//! TelemetryLog - per-run column buffers
//!
//! One Vec per CSV column. Cleared at run start, appended once per tick,
//! drained to disk at the REST→END transition.

use std::path::Path;

use contracts::TelemetrySample;
use tracing::{debug, error};

use crate::csv;
use crate::error::TelemetryError;

/// Column buffers for one wheel slot
#[derive(Debug, Clone, Default)]
pub(crate) struct WheelSeries {
    pub(crate) force: Vec<f64>,
    pub(crate) longitudinal_slip: Vec<f64>,
    pub(crate) lateral_slip: Vec<f64>,
}

/// Append-only telemetry buffer for a single run
///
/// All series grow in lockstep through [`TelemetryLog::record`]; export
/// refuses to write anything when they disagree.
#[derive(Debug, Clone, Default)]
pub struct TelemetryLog {
    pub(crate) time: Vec<f64>,
    pub(crate) speed: Vec<f64>,
    pub(crate) roll: Vec<f64>,
    /// FL, FR, RL, RR order
    pub(crate) wheels: [WheelSeries; 4],
}

impl TelemetryLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one sample to every series. Call at most once per tick.
    pub fn record(&mut self, sample: &TelemetrySample) {
        self.time.push(sample.time);
        self.speed.push(sample.speed);
        self.roll.push(sample.roll);
        for (series, wheel) in self.wheels.iter_mut().zip(sample.wheels.iter()) {
            series.force.push(wheel.force);
            series.longitudinal_slip.push(wheel.longitudinal_slip);
            series.lateral_slip.push(wheel.lateral_slip);
        }
        metrics::counter!("telemetry_samples_total").increment(1);
    }

    /// Reset every series to empty. Called at run start.
    pub fn clear(&mut self) {
        self.time.clear();
        self.speed.clear();
        self.roll.clear();
        for series in self.wheels.iter_mut() {
            series.force.clear();
            series.longitudinal_slip.clear();
            series.lateral_slip.clear();
        }
    }

    /// Number of recorded samples (length of the time series)
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// True when nothing has been recorded since the last clear
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Highest recorded speed, if any samples exist (km/h)
    pub fn peak_speed(&self) -> Option<f64> {
        self.speed.iter().copied().reduce(f64::max)
    }

    /// Serialize all series to a CSV file at `path`
    ///
    /// Fails with [`TelemetryError::LengthMismatch`] before any bytes are
    /// written when the series disagree in length, and with
    /// [`TelemetryError::Io`] when the destination cannot be created or
    /// written. Parent directories are created on demand. Rows keep
    /// recording order; roll angles above 300 degrees are remapped by
    /// subtracting 360 at write time only.
    pub fn export(&self, path: impl AsRef<Path>) -> Result<(), TelemetryError> {
        let path = path.as_ref();
        match csv::write_csv(self, path) {
            Ok(rows) => {
                metrics::counter!("telemetry_exports_total", "status" => "ok").increment(1);
                debug!(path = %path.display(), rows, "telemetry exported");
                Ok(())
            }
            Err(e) => {
                metrics::counter!("telemetry_exports_total", "status" => "error").increment(1);
                error!(path = %path.display(), error = %e, "telemetry export failed");
                Err(e)
            }
        }
    }
}

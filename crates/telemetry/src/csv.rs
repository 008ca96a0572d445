//! CSV writer for the telemetry log
//!
//! Plain text, comma-and-space separated, 15 fixed columns. Every line ends
//! with a single space before the newline, matching the upstream tooling
//! that consumes these files.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::TelemetryError;
use crate::log::TelemetryLog;

/// Column layout, header order. Wheel columns run FL, FR, RL, RR.
pub const CSV_COLUMNS: [&str; 15] = [
    "time(sec)",
    "speed(km/h)",
    "roll angle",
    "FL force",
    "FR force",
    "RL force",
    "RR force",
    "FL long-slip",
    "FR long-slip",
    "RL long-slip",
    "RR long-slip",
    "FL lat-slip",
    "FR lat-slip",
    "RL lat-slip",
    "RR lat-slip",
];

/// Remap a raw 0-360 roll reading into the signed export representation.
///
/// Values above 300 degrees wrap to their negative small-angle form; the
/// threshold is the literal the downstream tooling expects, not a general
/// +/-180 normalization.
pub(crate) fn normalize_roll(roll: f64) -> f64 {
    if roll > 300.0 {
        roll - 360.0
    } else {
        roll
    }
}

/// Verify that every series matches the time series in length.
fn check_series_lengths(log: &TelemetryLog) -> Result<(), TelemetryError> {
    let expected = log.time.len();

    let mut lengths: Vec<(&'static str, usize)> = Vec::with_capacity(14);
    lengths.push((CSV_COLUMNS[1], log.speed.len()));
    lengths.push((CSV_COLUMNS[2], log.roll.len()));
    for (i, wheel) in log.wheels.iter().enumerate() {
        lengths.push((CSV_COLUMNS[3 + i], wheel.force.len()));
    }
    for (i, wheel) in log.wheels.iter().enumerate() {
        lengths.push((CSV_COLUMNS[7 + i], wheel.longitudinal_slip.len()));
    }
    for (i, wheel) in log.wheels.iter().enumerate() {
        lengths.push((CSV_COLUMNS[11 + i], wheel.lateral_slip.len()));
    }

    for (series, actual) in lengths {
        if actual != expected {
            return Err(TelemetryError::length_mismatch(series, expected, actual));
        }
    }
    Ok(())
}

/// Write the whole log as CSV. Integrity is checked before the destination
/// is touched; on success returns the number of data rows written.
pub(crate) fn write_csv(log: &TelemetryLog, path: &Path) -> Result<usize, TelemetryError> {
    check_series_lengths(log)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| TelemetryError::io(path, e))?;
        }
    }

    let file = File::create(path).map_err(|e| TelemetryError::io(path, e))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{} ", CSV_COLUMNS.join(", ")).map_err(|e| TelemetryError::io(path, e))?;

    for i in 0..log.time.len() {
        let roll = normalize_roll(log.roll[i]);
        writeln!(
            writer,
            "{}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {} ",
            log.time[i],
            log.speed[i],
            roll,
            log.wheels[0].force[i],
            log.wheels[1].force[i],
            log.wheels[2].force[i],
            log.wheels[3].force[i],
            log.wheels[0].longitudinal_slip[i],
            log.wheels[1].longitudinal_slip[i],
            log.wheels[2].longitudinal_slip[i],
            log.wheels[3].longitudinal_slip[i],
            log.wheels[0].lateral_slip[i],
            log.wheels[1].lateral_slip[i],
            log.wheels[2].lateral_slip[i],
            log.wheels[3].lateral_slip[i],
        )
        .map_err(|e| TelemetryError::io(path, e))?;
    }

    writer.flush().map_err(|e| TelemetryError::io(path, e))?;
    Ok(log.time.len())
}

//! Output format of the calibration utility.
//!
//! On every accepted button press the utility emits one CSV record followed
//! by a human readable hint, which makes it easy to pick tilt thresholds from
//! a handful of samples per position.

use crate::tilt::{MotionSample, Thresholds, TiltClass};
use core::fmt::{Error, Write};
use heapless::String;

pub const LINE_CAPACITY: usize = 128;

pub type Line = String<LINE_CAPACITY>;

/// Printed once before the first record.
pub const CSV_HEADER: &str = "# timestamp_ms, ax, ay, az, gx, gy, gz, temp_c\n";

/// Formats `sample` as `timestamp_ms, ax, ay, az, gx, gy, gz, temp_c`.
pub fn csv_record(timestamp_ms: u32, sample: &MotionSample) -> Result<Line, Error> {
    let mut line = Line::new();
    writeln!(
        line,
        "{timestamp_ms}, {:.4}, {:.4}, {:.4}, {:.4}, {:.4}, {:.4}, {:.2}",
        sample.ax, sample.ay, sample.az, sample.gx, sample.gy, sample.gz, sample.temperature
    )?;
    Ok(line)
}

#[must_use]
pub const fn position_hint(class: TiltClass) -> &'static str {
    match class {
        TiltClass::Left => "TILTED LEFT",
        TiltClass::Middle => "MIDDLE",
        TiltClass::Right => "TILTED RIGHT",
        TiltClass::Unknown => "UNKNOWN",
    }
}

/// Formats the hint following a record, including the blank separator line.
pub fn hint(
    sample_number: u32,
    sample: &MotionSample,
    thresholds: &Thresholds,
) -> Result<Line, Error> {
    let mut line = Line::new();
    writeln!(
        line,
        "# Sample {sample_number}: ax={:.3} | Position hint: {}\n",
        sample.ax,
        position_hint(thresholds.classify(sample.ax))
    )?;
    Ok(line)
}

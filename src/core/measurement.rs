// A single decoded blood-pressure measurement

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Substitute timestamp for records whose date bytes do not parse
pub fn sentinel_timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2015, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// One measurement cycle decoded from the monitor's memory.
///
/// Immutable once constructed; identity for deduplication is the
/// `content_hash`, not object identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Lowercase hex SHA-256 over the user id and the raw record bytes
    pub content_hash: String,

    /// When the cycle was recorded, or the sentinel date if the record's
    /// timestamp digits were unreadable
    pub taken_at: NaiveDateTime,

    /// Systolic pressure in mmHg
    pub systolic: u16,

    /// Diastolic pressure in mmHg
    pub diastolic: u16,

    /// Pulse in beats per minute
    pub pulse: u16,

    /// Systolic minus diastolic; negative when the record is inconsistent
    pub pulse_pressure: i32,

    /// Diastolic plus a third of the pulse pressure
    pub mean_arterial_pressure: f64,
}

impl Measurement {
    /// Build a measurement from its decoded fields, deriving the pulse
    /// pressure and mean arterial pressure
    pub fn new(
        content_hash: String,
        taken_at: NaiveDateTime,
        systolic: u16,
        diastolic: u16,
        pulse: u16,
    ) -> Self {
        let pulse_pressure = systolic as i32 - diastolic as i32;
        let mean_arterial_pressure = diastolic as f64 + pulse_pressure as f64 / 3.0;

        Self {
            content_hash,
            taken_at,
            systolic,
            diastolic,
            pulse,
            pulse_pressure,
            mean_arterial_pressure,
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}/{} mmHg, pulse {}",
            self.taken_at.format("%Y-%m-%d %H:%M"),
            self.systolic,
            self.diastolic,
            self.pulse
        )
    }
}

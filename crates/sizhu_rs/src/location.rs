//! Birth location: longitude plus the civil UTC offset in force.

use serde::{Deserialize, Serialize};
use sizhu_time::MAX_UTC_OFFSET_MINUTES;

use crate::error::InputError;

/// Where (and on which civil clock) a birth was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Geographic longitude in degrees, east positive.
    pub longitude_deg: f64,
    /// Offset of the civil clock from UTC, in minutes.
    pub utc_offset_minutes: i32,
}

/// Built-in presets: name, longitude, offset minutes.
const PRESETS: &[(&str, f64, i32)] = &[
    ("seoul", 126.978, 540),
    ("busan", 129.075, 540),
    ("incheon", 126.705, 540),
    ("daegu", 128.601, 540),
    ("daejeon", 127.385, 540),
    ("gwangju", 126.852, 540),
    ("jeju", 126.531, 540),
    ("tokyo", 139.692, 540),
    ("osaka", 135.502, 540),
    ("beijing", 116.407, 480),
    ("shanghai", 121.474, 480),
    ("hong-kong", 114.169, 480),
    ("taipei", 121.565, 480),
    ("singapore", 103.820, 480),
];

impl Location {
    pub const fn new(longitude_deg: f64, utc_offset_minutes: i32) -> Self {
        Self {
            longitude_deg,
            utc_offset_minutes,
        }
    }

    /// Look up a preset by name (case-insensitive, `_`, `-` and spaces
    /// interchangeable).
    pub fn named(name: &str) -> Result<Self, InputError> {
        let key = name.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        PRESETS
            .iter()
            .find(|(n, _, _)| *n == key)
            .map(|&(_, lon, off)| Self::new(lon, off))
            .ok_or_else(|| InputError::UnknownLocation(name.to_string()))
    }

    /// Names of the built-in presets.
    pub fn preset_names() -> impl Iterator<Item = &'static str> {
        PRESETS.iter().map(|(n, _, _)| *n)
    }

    pub fn validate(&self) -> Result<(), InputError> {
        if !self.longitude_deg.is_finite() || self.longitude_deg.abs() > 180.0 {
            return Err(InputError::Longitude(self.longitude_deg));
        }
        if self.utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(InputError::UtcOffset(self.utc_offset_minutes));
        }
        Ok(())
    }
}

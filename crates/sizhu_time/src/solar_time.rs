//! Civil clock → local solar time corrections.
//!
//! - Mean solar time: 4 minutes of clock per degree of longitude away from
//!   the zone's reference meridian.
//! - Apparent solar time: mean solar time plus the equation of time.
//!
//! Which terms apply is chosen by [`CorrectionMode`].

use std::f64::consts::TAU;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use sizhu_config::CorrectionMode;

use crate::civil::CivilTime;

/// Clock minutes per degree of longitude.
pub const MINUTES_PER_DEGREE: f64 = 4.0;

/// Equation of time (apparent − mean solar time) in minutes.
///
/// Day-of-year approximation, accurate to about ±1 minute:
/// `B = 360°/365 × (N − 81)`, `EoT = 9.87 sin 2B − 7.53 cos B − 1.5 sin B`.
pub fn equation_of_time_minutes(date: NaiveDate) -> f64 {
    let n = date.ordinal() as f64;
    let b = TAU * (n - 81.0) / 365.0;
    9.87 * (2.0 * b).sin() - 7.53 * b.cos() - 1.5 * b.sin()
}

/// Central meridian of a fixed UTC offset, in degrees east.
pub fn reference_meridian_deg(utc_offset_minutes: i32) -> f64 {
    utc_offset_minutes as f64 / MINUTES_PER_DEGREE
}

/// `(longitude − reference meridian) × 4` minutes.
pub fn mean_solar_correction_minutes(longitude_deg: f64, reference_meridian_deg: f64) -> f64 {
    (longitude_deg - reference_meridian_deg) * MINUTES_PER_DEGREE
}

/// Breakdown of the minutes added to the civil clock.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeCorrection {
    pub mode: CorrectionMode,
    pub longitude_minutes: f64,
    pub equation_of_time_minutes: f64,
}

impl TimeCorrection {
    pub fn total_minutes(&self) -> f64 {
        self.longitude_minutes + self.equation_of_time_minutes
    }
}

/// Apply the requested correction terms to a civil time.
///
/// The equation of time is evaluated on the civil date. The returned instant
/// keeps the civil offset; only the clock reading moves.
pub fn corrected_time(
    civil: &CivilTime,
    longitude_deg: f64,
    mode: CorrectionMode,
) -> (CivilTime, TimeCorrection) {
    let longitude_minutes = if mode.applies_longitude() {
        mean_solar_correction_minutes(
            longitude_deg,
            reference_meridian_deg(civil.utc_offset_minutes),
        )
    } else {
        0.0
    };
    let equation_of_time_minutes = if mode.applies_equation_of_time() {
        equation_of_time_minutes(civil.date())
    } else {
        0.0
    };
    let correction = TimeCorrection {
        mode,
        longitude_minutes,
        equation_of_time_minutes,
    };
    (civil.shifted_minutes(correction.total_minutes()), correction)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn eot_early_november_peak() {
        let e = equation_of_time_minutes(date(2024, 11, 3));
        assert!((15.0..17.5).contains(&e), "got {e}");
    }

    #[test]
    fn eot_mid_february_trough() {
        let e = equation_of_time_minutes(date(2023, 2, 12));
        assert!((-15.5..-13.0).contains(&e), "got {e}");
    }

    #[test]
    fn eot_small_in_mid_april() {
        let e = equation_of_time_minutes(date(2023, 4, 15));
        assert!(e.abs() < 1.5, "got {e}");
    }

    #[test]
    fn kst_meridian_is_135() {
        assert_eq!(reference_meridian_deg(540), 135.0);
    }

    #[test]
    fn seoul_is_about_32_minutes_behind() {
        let m = mean_solar_correction_minutes(126.978, 135.0);
        assert!((m + 32.088).abs() < 1e-3);
    }

    #[test]
    fn mode_none_leaves_clock() {
        let civil = CivilTime::from_ymd_hms(2024, 6, 21, 12, 0, 0, 540).unwrap();
        let (c, corr) = corrected_time(&civil, 126.978, CorrectionMode::None);
        assert_eq!(c, civil);
        assert_eq!(corr.total_minutes(), 0.0);
    }

    #[test]
    fn mode_longitude_only() {
        let civil = CivilTime::from_ymd_hms(2024, 6, 21, 12, 0, 0, 540).unwrap();
        let (c, corr) = corrected_time(&civil, 120.0, CorrectionMode::Longitude);
        assert_eq!(corr.longitude_minutes, -60.0);
        assert_eq!(corr.equation_of_time_minutes, 0.0);
        assert_eq!(c.local.to_string(), "2024-06-21 11:00:00");
    }

    #[test]
    fn mode_full_adds_eot() {
        let civil = CivilTime::from_ymd_hms(2024, 11, 3, 12, 0, 0, 0).unwrap();
        let (c, corr) = corrected_time(&civil, 0.0, CorrectionMode::LongitudeAndEquationOfTime);
        assert_eq!(corr.longitude_minutes, 0.0);
        assert!(corr.equation_of_time_minutes > 15.0);
        assert!(c.local > civil.local);
    }
}

//! Civil time handling for the sizhu engine.
//!
//! This crate provides:
//! - `CivilTime`, a local wall-clock instant with a fixed UTC offset
//! - Julian Date / Julian Day Number conversions
//! - ΔT (TT − UT) for placing astronomical events on the civil axis
//! - Mean and apparent solar time corrections

pub mod civil;
pub mod delta_t;
pub mod error;
pub mod julian;
pub mod solar_time;

pub use civil::{CivilTime, MAX_UTC_OFFSET_MINUTES, jd_ut_local_ticks};
pub use delta_t::{delta_t_seconds, jd_ut_to_tt};
pub use error::TimeError;
pub use julian::{
    DAYS_PER_JULIAN_CENTURY, J2000_JD, SECONDS_PER_DAY, UNIX_EPOCH_JD, calendar_to_jd,
    jd_to_calendar, jd_to_centuries, julian_day_number,
};
pub use solar_time::{
    MINUTES_PER_DEGREE, TimeCorrection, corrected_time, equation_of_time_minutes,
    mean_solar_correction_minutes, reference_meridian_deg,
};

//! Local civil date/time with a fixed UTC offset.
//!
//! `CivilTime` is the canonical instant used throughout the engine. It keeps
//! the wall-clock reading the caller supplied next to the offset that ties it
//! to Universal Time, so boundary comparisons can happen on the local clock
//! while astronomy happens in UT/TT.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::TimeError;
use crate::julian::{SECONDS_PER_DAY, UNIX_EPOCH_JD};

/// Largest accepted offset magnitude (UTC+14:00, Line Islands).
pub const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// Local wall-clock time at a fixed offset from UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CivilTime {
    pub local: NaiveDateTime,
    pub utc_offset_minutes: i32,
}

impl CivilTime {
    pub fn new(local: NaiveDateTime, utc_offset_minutes: i32) -> Result<Self, TimeError> {
        if utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(TimeError::InvalidOffset(utc_offset_minutes));
        }
        Ok(Self {
            local,
            utc_offset_minutes,
        })
    }

    /// Build from calendar fields. Returns `OutOfRange` for impossible dates.
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        utc_offset_minutes: i32,
    ) -> Result<Self, TimeError> {
        let local = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, minute, second))
            .ok_or(TimeError::OutOfRange("invalid calendar date or time"))?;
        Self::new(local, utc_offset_minutes)
    }

    /// Convert a UT Julian Date to local time at the given offset.
    ///
    /// The result is rounded to the nearest millisecond.
    pub fn from_jd_ut(jd_ut: f64, utc_offset_minutes: i32) -> Result<Self, TimeError> {
        let ms = ((jd_ut - UNIX_EPOCH_JD) * SECONDS_PER_DAY * 1000.0).round() as i64
            + utc_offset_minutes as i64 * 60_000;
        let local = DateTime::from_timestamp_millis(ms)
            .ok_or(TimeError::OutOfRange("julian date outside calendar range"))?
            .naive_utc();
        Self::new(local, utc_offset_minutes)
    }

    /// Universal Time Julian Date of this instant.
    pub fn to_jd_ut(&self) -> f64 {
        UNIX_EPOCH_JD + self.local_seconds_f64() / SECONDS_PER_DAY
            - self.utc_offset_minutes as f64 / 1440.0
    }

    /// Same instant, same offset, clock shifted by `minutes` (may be fractional).
    pub fn shifted_minutes(&self, minutes: f64) -> Self {
        let ms = (minutes * 60_000.0).round() as i64;
        Self {
            local: self.local + Duration::milliseconds(ms),
            utc_offset_minutes: self.utc_offset_minutes,
        }
    }

    /// Local clock reading in whole units of `unit_seconds` since the Unix
    /// epoch, truncated toward negative infinity.
    pub fn local_ticks(&self, unit_seconds: i64) -> i64 {
        self.local.and_utc().timestamp().div_euclid(unit_seconds)
    }

    pub fn date(&self) -> NaiveDate {
        self.local.date()
    }

    pub fn hour(&self) -> u32 {
        self.local.hour()
    }

    /// Local clock seconds since the Unix epoch, including sub-second part.
    fn local_seconds_f64(&self) -> f64 {
        let utc = self.local.and_utc();
        utc.timestamp() as f64 + utc.timestamp_subsec_nanos() as f64 * 1e-9
    }
}

/// Local clock ticks of a UT Julian Date, as [`CivilTime::local_ticks`] would
/// report for the same instant, without the millisecond rounding.
pub fn jd_ut_local_ticks(jd_ut: f64, utc_offset_minutes: i32, unit_seconds: i64) -> i64 {
    let seconds = (jd_ut - UNIX_EPOCH_JD) * SECONDS_PER_DAY + utc_offset_minutes as f64 * 60.0;
    (seconds / unit_seconds as f64).floor() as i64
}

impl std::fmt::Display for CivilTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.utc_offset_minutes < 0 { '-' } else { '+' };
        let off = self.utc_offset_minutes.abs();
        write!(
            f,
            "{}{}{:02}:{:02}",
            self.local.format("%Y-%m-%dT%H:%M:%S"),
            sign,
            off / 60,
            off % 60
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::julian::calendar_to_jd;

    #[test]
    fn rejects_large_offset() {
        let local = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(
            CivilTime::new(local, 15 * 60),
            Err(TimeError::InvalidOffset(900))
        );
    }

    #[test]
    fn rejects_impossible_date() {
        assert!(CivilTime::from_ymd_hms(2023, 2, 29, 0, 0, 0, 0).is_err());
    }

    #[test]
    fn jd_of_kst_midnight() {
        // 2024-01-01 00:00 KST = 2023-12-31 15:00 UTC
        let t = CivilTime::from_ymd_hms(2024, 1, 1, 0, 0, 0, 540).unwrap();
        let expected = calendar_to_jd(2023, 12, 31.0 + 15.0 / 24.0);
        assert!((t.to_jd_ut() - expected).abs() < 1e-9);
    }

    #[test]
    fn jd_roundtrip() {
        let t = CivilTime::from_ymd_hms(1987, 6, 15, 13, 45, 27, -300).unwrap();
        let back = CivilTime::from_jd_ut(t.to_jd_ut(), -300).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn shifted_minutes_crosses_midnight() {
        let t = CivilTime::from_ymd_hms(2024, 3, 1, 23, 50, 0, 540).unwrap();
        let s = t.shifted_minutes(15.5);
        assert_eq!(s.to_string(), "2024-03-02T00:05:30+09:00");
    }

    #[test]
    fn ticks_agree_with_jd_ticks() {
        let t = CivilTime::from_ymd_hms(2024, 2, 4, 16, 27, 3, 540).unwrap();
        for unit in [1, 60] {
            assert_eq!(
                t.local_ticks(unit),
                jd_ut_local_ticks(t.to_jd_ut() + 1e-9, 540, unit)
            );
        }
    }

    #[test]
    fn display_negative_offset() {
        let t = CivilTime::from_ymd_hms(2024, 7, 4, 9, 5, 0, -330).unwrap();
        assert_eq!(t.to_string(), "2024-07-04T09:05:00-05:30");
    }
}

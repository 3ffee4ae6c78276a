//! Chart input and its validation.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};
use sizhu_base::Sex;
use sizhu_config::BoundaryPolicy;
use sizhu_search::LuckConfig;
use sizhu_time::{CivilTime, MAX_UTC_OFFSET_MINUTES};

use crate::error::InputError;
use crate::location::Location;

/// Years the solar theory and ΔT model are trusted over.
pub const MIN_SUPPORTED_YEAR: i32 = 1800;
pub const MAX_SUPPORTED_YEAR: i32 = 2200;

/// Everything a chart is a function of.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthInput {
    /// Civil birth date at `location`.
    pub date: NaiveDate,
    /// Civil birth time; `None` omits the hour pillar.
    #[serde(default)]
    pub time: Option<NaiveTime>,
    /// `None` omits the decade luck cycle.
    #[serde(default)]
    pub sex: Option<Sex>,
    pub location: Location,
    #[serde(default)]
    pub policy: BoundaryPolicy,
    /// Evaluation instant for annual luck; `None` omits it.
    #[serde(default)]
    pub as_of: Option<CivilTime>,
    #[serde(default)]
    pub luck: LuckConfig,
}

impl BirthInput {
    /// Input with default policy and no sex or as-of instant.
    pub fn new(date: NaiveDate, time: Option<NaiveTime>, location: Location) -> Self {
        Self {
            date,
            time,
            sex: None,
            location,
            policy: BoundaryPolicy::default(),
            as_of: None,
            luck: LuckConfig::default(),
        }
    }

    pub fn with_sex(mut self, sex: Sex) -> Self {
        self.sex = Some(sex);
        self
    }

    pub fn with_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_as_of(mut self, as_of: CivilTime) -> Self {
        self.as_of = Some(as_of);
        self
    }

    pub fn validate(&self) -> Result<(), InputError> {
        self.location.validate()?;
        check_year(self.date.year())?;
        if let Some(as_of) = &self.as_of {
            if as_of.utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
                return Err(InputError::UtcOffset(as_of.utc_offset_minutes));
            }
            check_year(as_of.date().year())?;
        }
        Ok(())
    }

    /// Local birth instant; noon stands in for an unknown time.
    pub(crate) fn local_datetime(&self) -> NaiveDateTime {
        let time = self
            .time
            .unwrap_or_else(|| NaiveTime::MIN + TimeDelta::hours(12));
        self.date.and_time(time)
    }
}

fn check_year(year: i32) -> Result<(), InputError> {
    if (MIN_SUPPORTED_YEAR..=MAX_SUPPORTED_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(InputError::YearOutOfRange(year))
    }
}

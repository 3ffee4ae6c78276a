//! Luck-cycle (dayun / liunian) pure math.
//!
//! - Direction from year-stem polarity and sex
//! - Start age from the days between birth and the nearest month boundary
//! - Decade and annual sequences, and lookups into them
//!
//! Finding the boundary instants is the search crate's job; everything here
//! works on already-resolved pillars and day counts.

use serde::{Deserialize, Serialize};

use crate::element::Polarity;
use crate::sexagenary::{Stem, StemBranch, year_stem_branch};
use crate::ten_deity::{TenDeity, ten_deity};
use crate::void::is_void;

/// Conventional rate: 3 days between birth and boundary = 1 year of age.
pub const DAYS_PER_LUCK_YEAR: f64 = 3.0;

/// Number of decade entries generated.
pub const DECADE_COUNT: usize = 10;

/// Years spanned by one decade entry.
pub const DECADE_SPAN_YEARS: u32 = 10;

/// Bounds of the rounded start age.
pub const MIN_START_AGE: u32 = 1;
pub const MAX_START_AGE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

/// Direction in which the decade sequence walks the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LuckDirection {
    Forward,
    Backward,
}

impl LuckDirection {
    /// Cycle step: +1 forward, −1 backward.
    pub const fn step(self) -> i32 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

/// Yang year + male or yin year + female walks forward; the other two
/// combinations walk backward.
pub const fn luck_direction(year_stem: Stem, sex: Sex) -> LuckDirection {
    match (year_stem.polarity(), sex) {
        (Polarity::Yang, Sex::Male) | (Polarity::Yin, Sex::Female) => LuckDirection::Forward,
        (Polarity::Yang, Sex::Female) | (Polarity::Yin, Sex::Male) => LuckDirection::Backward,
    }
}

/// Start age of the first decade entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LuckStartAge {
    /// Days between birth and the boundary in the luck direction.
    pub elapsed_days: f64,
    /// `elapsed_days / DAYS_PER_LUCK_YEAR`, unrounded.
    pub exact_years: f64,
    /// Rounded half-up and clamped to `[MIN_START_AGE, MAX_START_AGE]`.
    pub years: u32,
}

/// Convert the elapsed days to a start age.
pub fn luck_start_age(elapsed_days: f64) -> LuckStartAge {
    let elapsed_days = elapsed_days.abs();
    let exact_years = elapsed_days / DAYS_PER_LUCK_YEAR;
    let years = ((exact_years + 0.5).floor() as u32).clamp(MIN_START_AGE, MAX_START_AGE);
    LuckStartAge {
        elapsed_days,
        exact_years,
        years,
    }
}

/// One ten-year luck pillar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecadeLuck {
    pub stem_branch: StemBranch,
    pub ten_deity: TenDeity,
    /// First age (inclusive) covered by this entry.
    pub age_start: u32,
    /// Last age (inclusive) covered by this entry.
    pub age_end: u32,
}

impl DecadeLuck {
    pub const fn contains_age(&self, age: u32) -> bool {
        age >= self.age_start && age <= self.age_end
    }
}

/// Ten decade entries starting one step from the month pillar.
pub fn decade_cycle(
    month_pillar: StemBranch,
    day_stem: Stem,
    direction: LuckDirection,
    start_age: u32,
) -> Vec<DecadeLuck> {
    (0..DECADE_COUNT as i32)
        .map(|k| {
            let sb = month_pillar.offset(direction.step() * (k + 1));
            let age_start = start_age + DECADE_SPAN_YEARS * k as u32;
            DecadeLuck {
                stem_branch: sb,
                ten_deity: ten_deity(day_stem, sb.stem),
                age_start,
                age_end: age_start + DECADE_SPAN_YEARS - 1,
            }
        })
        .collect()
}

/// One year of the annual cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualLuck {
    /// Pillar year (the civil year in which this pillar year begins).
    pub calendar_year: i32,
    pub stem_branch: StemBranch,
    pub ten_deity: TenDeity,
    /// Branch is one of the day pillar's void branches.
    pub is_void: bool,
}

/// Annual entries for `center − radius ..= center + radius`.
pub fn annual_cycle(center_year: i32, radius: u32, day_pillar: StemBranch) -> Vec<AnnualLuck> {
    let r = radius as i32;
    (center_year - r..=center_year + r)
        .map(|year| {
            let sb = year_stem_branch(year);
            AnnualLuck {
                calendar_year: year,
                stem_branch: sb,
                ten_deity: ten_deity(day_pillar.stem, sb.stem),
                is_void: is_void(day_pillar, sb.branch),
            }
        })
        .collect()
}

/// Decade entry whose age window contains `age`.
pub fn find_decade(entries: &[DecadeLuck], age: u32) -> Option<&DecadeLuck> {
    entries.iter().find(|e| e.contains_age(age))
}

/// Annual entry for a pillar year.
pub fn find_annual(entries: &[AnnualLuck], pillar_year: i32) -> Option<&AnnualLuck> {
    entries.iter().find(|e| e.calendar_year == pillar_year)
}

/// Traditional reckoning age: one at birth, plus one at each year boundary.
pub const fn reckoning_age(birth_pillar_year: i32, as_of_pillar_year: i32) -> u32 {
    let d = as_of_pillar_year - birth_pillar_year + 1;
    if d < 0 { 0 } else { d as u32 }
}

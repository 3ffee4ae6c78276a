//! Types for luck-cycle computation.

use serde::{Deserialize, Serialize};
use sizhu_base::{AnnualLuck, DecadeLuck, LuckDirection, LuckStartAge};
use sizhu_time::CivilTime;

use crate::solar_term_types::SolarTermEvent;

/// Default number of years on each side of the as-of year.
pub const DEFAULT_ANNUAL_RADIUS: u32 = 5;

/// Largest accepted annual radius (one full cycle each way).
pub const MAX_ANNUAL_RADIUS: u32 = 60;

/// Options for luck-cycle computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LuckConfig {
    /// Annual entries span `as_of ± annual_radius` pillar years.
    pub annual_radius: u32,
}

impl Default for LuckConfig {
    fn default() -> Self {
        Self {
            annual_radius: DEFAULT_ANNUAL_RADIUS,
        }
    }
}

impl LuckConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.annual_radius > MAX_ANNUAL_RADIUS {
            return Err("annual_radius must be <= 60");
        }
        Ok(())
    }
}

/// How the first decade's start age was derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LuckStart {
    pub direction: LuckDirection,
    /// Sectional term nearest the corrected birth instant in `direction`.
    pub boundary: SolarTermEvent,
    pub age: LuckStartAge,
}

/// Ten decade entries and their anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecadeCycle {
    pub start: LuckStart,
    pub entries: Vec<DecadeLuck>,
}

/// Annual entries centred on the as-of pillar year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualWindow {
    pub as_of: CivilTime,
    /// Pillar year of `as_of`.
    pub pillar_year: i32,
    /// Lichun that decided `pillar_year`.
    pub lichun: SolarTermEvent,
    pub entries: Vec<AnnualLuck>,
}

/// Entries in effect at the as-of instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentLuck {
    /// Reckoning age at the as-of instant: as-of pillar year minus birth
    /// pillar year, plus one. The decade windows' `age_start`/`age_end` are
    /// matched against this count, not against elapsed years since birth.
    pub age: u32,
    pub decade: Option<DecadeLuck>,
    pub annual: Option<AnnualLuck>,
}

/// Decade and annual luck of a chart. Parts whose inputs were not supplied
/// are `None`: no sex means no direction, no as-of means no annual window.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LuckCycles {
    pub decade: Option<DecadeCycle>,
    pub annual: Option<AnnualWindow>,
    pub current: Option<CurrentLuck>,
}

//! Types for pillar assignment.

use serde::{Deserialize, Serialize};
use sizhu_base::{Stem, StemBranch, hidden_stems};
use sizhu_config::{DayCutover, TimeReference};
use sizhu_time::{CivilTime, TimeCorrection};

use crate::solar_term_types::SolarTermEvent;

/// The rule that produced a pillar, with the boundary that drove it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum BoundaryRule {
    /// Year pillar from the Lichun of the reference instant's civil year.
    LichunYear {
        lichun: SolarTermEvent,
        /// The reference instant had not passed Lichun, so the pillar year
        /// is the previous civil year.
        before_lichun: bool,
    },
    /// Month pillar from the last sectional term passed.
    SectionalMonth { term: SolarTermEvent, ordinal: u8 },
    /// Day pillar from the corrected civil date.
    CivilDay {
        cutover: DayCutover,
        /// The corrected clock was at or past the cutover hour.
        rolled: bool,
    },
    /// Hour pillar from the two-hour slot of the corrected clock.
    DoubleHour { hour: u32 },
}

impl BoundaryRule {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::LichunYear { .. } => "lichun_year",
            Self::SectionalMonth { .. } => "sectional_month",
            Self::CivilDay { .. } => "civil_day",
            Self::DoubleHour { .. } => "double_hour",
        }
    }

    /// Solar-term event behind a year or month decision.
    pub fn solar_term(&self) -> Option<&SolarTermEvent> {
        match self {
            Self::LichunYear { lichun, .. } => Some(lichun),
            Self::SectionalMonth { term, .. } => Some(term),
            Self::CivilDay { .. } | Self::DoubleHour { .. } => None,
        }
    }
}

/// One pillar of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pillar {
    pub stem_branch: StemBranch,
    /// Hidden stems of the branch, main qi first.
    pub hidden_stems: Vec<Stem>,
    pub rule: BoundaryRule,
}

impl Pillar {
    pub fn new(stem_branch: StemBranch, rule: BoundaryRule) -> Self {
        Self {
            stem_branch,
            hidden_stems: hidden_stems(stem_branch.branch).to_vec(),
            rule,
        }
    }
}

/// The instants a chart's boundary decisions are made against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceInstants {
    /// Birth time as supplied.
    pub civil: CivilTime,
    /// Birth time after the policy's solar-time correction.
    pub corrected: CivilTime,
    pub correction: TimeCorrection,
    /// Which of the two is compared against solar terms.
    pub time_reference: TimeReference,
}

impl ReferenceInstants {
    /// The instant compared against solar-term boundaries.
    pub fn boundary_instant(&self) -> &CivilTime {
        match self.time_reference {
            TimeReference::Civil => &self.civil,
            TimeReference::Corrected => &self.corrected,
        }
    }
}

/// Year, month, day and (optional) hour pillars of one birth instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PillarSet {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Option<Pillar>,
    /// Civil year whose Lichun opens the year pillar.
    pub pillar_year: i32,
    /// Lichun that decided the year pillar.
    pub year_boundary: SolarTermEvent,
    /// Sectional term that opened the month pillar.
    pub month_boundary: SolarTermEvent,
    pub instants: ReferenceInstants,
}

impl PillarSet {
    /// Pillars present, in year/month/day/hour order.
    pub fn pillars(&self) -> Vec<&Pillar> {
        let mut out = vec![&self.year, &self.month, &self.day];
        if let Some(h) = &self.hour {
            out.push(h);
        }
        out
    }

    pub fn day_stem(&self) -> Stem {
        self.day.stem_branch.stem
    }

    /// Any solar-term event used for a decision came from the solver's
    /// fallback path.
    pub fn degraded(&self) -> bool {
        self.year_boundary.degraded || self.month_boundary.degraded
    }
}

//! Chart assembly: pillars, derived attributes, luck and the audit trail.

use chrono::{TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use sizhu_base::{Branch, FiveElementTally, Stem, TenDeity, main_hidden_stem, ten_deity};
use sizhu_config::BoundaryPolicy;
use sizhu_search::{
    LuckCycles, Pillar, PillarSet, SolarTermEvent, TermCache, compute_luck, compute_pillars,
};
use sizhu_time::{CivilTime, TimeCorrection};
use tracing::{debug_span, info};

use crate::error::SizhuError;
use crate::input::BirthInput;
use crate::location::Location;

/// Ten-deity relations of one pillar to the day master.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PillarDeities {
    /// Relation of the visible stem; `None` for the day stem itself.
    pub stem: Option<TenDeity>,
    /// Relation of the branch's main hidden stem.
    pub branch: TenDeity,
}

impl PillarDeities {
    fn of(day_master: Stem, pillar: &Pillar, is_day: bool) -> Self {
        let sb = pillar.stem_branch;
        Self {
            stem: (!is_day).then(|| ten_deity(day_master, sb.stem)),
            branch: ten_deity(day_master, main_hidden_stem(sb.branch)),
        }
    }
}

/// Ten-deity map of a chart, keyed by pillar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenDeityMap {
    pub day_master: Stem,
    pub year: PillarDeities,
    pub month: PillarDeities,
    pub day: PillarDeities,
    pub hour: Option<PillarDeities>,
}

impl TenDeityMap {
    pub fn from_pillars(set: &PillarSet) -> Self {
        let dm = set.day_stem();
        Self {
            day_master: dm,
            year: PillarDeities::of(dm, &set.year, false),
            month: PillarDeities::of(dm, &set.month, false),
            day: PillarDeities::of(dm, &set.day, true),
            hour: set.hour.as_ref().map(|h| PillarDeities::of(dm, h, false)),
        }
    }
}

/// A solar-term event with its instant on the birth location's civil clock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AuditedTerm {
    pub event: SolarTermEvent,
    pub local: CivilTime,
}

impl AuditedTerm {
    fn new(event: SolarTermEvent, utc_offset_minutes: i32) -> Result<Self, SizhuError> {
        Ok(Self {
            event,
            local: CivilTime::from_jd_ut(event.jd_ut, utc_offset_minutes)?,
        })
    }
}

/// Every input and boundary behind a chart's decisions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartAudit {
    pub policy: BoundaryPolicy,
    pub location: Location,
    /// The birth time was supplied (otherwise noon stood in for it).
    pub time_known: bool,
    pub civil: CivilTime,
    pub corrected: CivilTime,
    pub correction: TimeCorrection,
    /// Lichun that decided the year pillar.
    pub year_boundary: AuditedTerm,
    /// Sectional term that opened the month pillar.
    pub month_boundary: AuditedTerm,
    /// Sectional term the decade luck start age was counted to.
    pub luck_boundary: Option<AuditedTerm>,
    /// Lichun that decided the as-of pillar year.
    pub as_of_boundary: Option<AuditedTerm>,
    /// Some boundary above came from the solver's fallback estimate.
    pub degraded: bool,
}

/// A four-pillars chart. Immutable once computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Option<Pillar>,
    /// Civil year whose Lichun opens the year pillar.
    pub pillar_year: i32,
    pub ten_deities: TenDeityMap,
    pub five_elements: FiveElementTally,
    pub luck: LuckCycles,
    pub audit: ChartAudit,
}

impl Chart {
    /// Pillars present, in year/month/day/hour order.
    pub fn pillars(&self) -> Vec<&Pillar> {
        let mut out = vec![&self.year, &self.month, &self.day];
        if let Some(h) = &self.hour {
            out.push(h);
        }
        out
    }
}

/// Compute a chart.
///
/// Input is validated first; afterwards the only non-fatal anomaly is a
/// degraded solar-term solve, reported in `audit.degraded`.
pub fn compute_chart(input: &BirthInput) -> Result<Chart, SizhuError> {
    input.validate()?;
    let _span = debug_span!("compute_chart", date = %input.date).entered();

    let offset = input.location.utc_offset_minutes;
    let civil = CivilTime::new(input.local_datetime(), offset)?;
    let time_known = input.time.is_some();
    let policy = &input.policy;

    let mut cache = TermCache::new();
    let set = compute_pillars(
        &civil,
        input.location.longitude_deg,
        time_known,
        policy,
        &mut cache,
    );
    let luck = compute_luck(
        &set,
        input.sex,
        input.as_of.as_ref(),
        &input.luck,
        policy,
        &mut cache,
    )?;

    let stems: Vec<Stem> = set.pillars().iter().map(|p| p.stem_branch.stem).collect();
    let branches: Vec<Branch> = set.pillars().iter().map(|p| p.stem_branch.branch).collect();
    let five_elements = FiveElementTally::from_pillars(&stems, &branches);

    let audit = build_audit(input, &set, &luck)?;
    info!(
        year = %set.year.stem_branch,
        month = %set.month.stem_branch,
        day = %set.day.stem_branch,
        hour = ?set.hour.as_ref().map(|h| h.stem_branch.hanzi()),
        solves = cache.misses(),
        cache_hits = cache.hits(),
        degraded = audit.degraded,
        "chart computed"
    );

    Ok(Chart {
        ten_deities: TenDeityMap::from_pillars(&set),
        five_elements,
        luck,
        audit,
        pillar_year: set.pillar_year,
        year: set.year,
        month: set.month,
        day: set.day,
        hour: set.hour,
    })
}

/// Compute a chart with annual luck evaluated at the current time on the
/// birth location's civil clock.
pub fn compute_chart_now(input: &BirthInput) -> Result<Chart, SizhuError> {
    let offset = input.location.utc_offset_minutes;
    let local = Utc::now().naive_utc() + TimeDelta::minutes(i64::from(offset));
    let as_of = CivilTime::new(local, offset)?;
    compute_chart(&input.clone().with_as_of(as_of))
}

fn build_audit(
    input: &BirthInput,
    set: &PillarSet,
    luck: &LuckCycles,
) -> Result<ChartAudit, SizhuError> {
    let offset = input.location.utc_offset_minutes;
    let audited = |e: Option<SolarTermEvent>| e.map(|e| AuditedTerm::new(e, offset)).transpose();

    let luck_event = luck.decade.as_ref().map(|d| d.start.boundary);
    let as_of_event = luck.annual.as_ref().map(|a| a.lichun);

    let degraded =
        set.degraded() || [luck_event, as_of_event].iter().flatten().any(|e| e.degraded);

    Ok(ChartAudit {
        policy: input.policy,
        location: input.location,
        time_known: input.time.is_some(),
        civil: set.instants.civil,
        corrected: set.instants.corrected,
        correction: set.instants.correction,
        year_boundary: AuditedTerm::new(set.year_boundary, offset)?,
        month_boundary: AuditedTerm::new(set.month_boundary, offset)?,
        luck_boundary: audited(luck_event)?,
        as_of_boundary: audited(as_of_event)?,
        degraded,
    })
}

//! Luck-cycle orchestration: anchors the pure decade/annual math in
//! `sizhu_base::luck` to solved solar-term boundaries.

use chrono::Datelike;
use sizhu_base::{
    LuckDirection, Sex, StemBranch, annual_cycle, decade_cycle, find_annual, find_decade,
    luck_direction, luck_start_age, reckoning_age,
};
use sizhu_config::BoundaryPolicy;
use sizhu_time::CivilTime;
use tracing::debug;

use crate::error::SearchError;
use crate::luck_types::{AnnualWindow, CurrentLuck, DecadeCycle, LuckConfig, LuckCycles, LuckStart};
use crate::pillar::pillar_year;
use crate::pillar_types::PillarSet;
use crate::solar_term::{SectionalWindow, TermCache};

/// Direction and start age of the decade cycle.
///
/// The anchor is the nearest sectional term to the instant the month pillar
/// was decided on (civil or corrected, per `time_reference`): the next one
/// when walking forward, the last one passed when walking backward. Walking
/// backward therefore always lands on the month pillar's own boundary.
pub fn luck_start(
    pillars: &PillarSet,
    sex: Sex,
    policy: &BoundaryPolicy,
    cache: &mut TermCache,
) -> LuckStart {
    let reference = pillars.instants.boundary_instant();
    let direction = luck_direction(pillars.year.stem_branch.stem, sex);
    let unit = policy.precision.unit_seconds();
    let window = SectionalWindow::build(reference.date().year(), policy.precision, cache);
    let ticks = reference.local_ticks(unit);
    let offset = reference.utc_offset_minutes;

    let boundary = match direction {
        LuckDirection::Forward => window.first_pending(ticks, offset, unit, policy.tie_break),
        LuckDirection::Backward => window.last_passed(ticks, offset, unit, policy.tie_break),
    };
    let age = luck_start_age(boundary.jd_ut - reference.to_jd_ut());
    LuckStart {
        direction,
        boundary,
        age,
    }
}

/// Ten decade entries starting one step from the month pillar.
pub fn decade_luck(
    pillars: &PillarSet,
    sex: Sex,
    policy: &BoundaryPolicy,
    cache: &mut TermCache,
) -> DecadeCycle {
    let start = luck_start(pillars, sex, policy, cache);
    let entries = decade_cycle(
        pillars.month.stem_branch,
        pillars.day_stem(),
        start.direction,
        start.age.years,
    );
    DecadeCycle { start, entries }
}

/// Annual entries centred on the pillar year of `as_of`.
pub fn annual_luck(
    as_of: &CivilTime,
    day_pillar: StemBranch,
    radius: u32,
    policy: &BoundaryPolicy,
    cache: &mut TermCache,
) -> AnnualWindow {
    let (py, lichun) = pillar_year(as_of, policy, cache);
    AnnualWindow {
        as_of: *as_of,
        pillar_year: py,
        lichun,
        entries: annual_cycle(py, radius, day_pillar),
    }
}

/// Entries in effect at the annual window's as-of instant.
pub fn current_luck(
    pillars: &PillarSet,
    decade: Option<&DecadeCycle>,
    annual: &AnnualWindow,
) -> CurrentLuck {
    let age = reckoning_age(pillars.pillar_year, annual.pillar_year);
    CurrentLuck {
        age,
        decade: decade.and_then(|d| find_decade(&d.entries, age).copied()),
        annual: find_annual(&annual.entries, annual.pillar_year).copied(),
    }
}

/// Decade and annual luck for a chart.
pub fn compute_luck(
    pillars: &PillarSet,
    sex: Option<Sex>,
    as_of: Option<&CivilTime>,
    config: &LuckConfig,
    policy: &BoundaryPolicy,
    cache: &mut TermCache,
) -> Result<LuckCycles, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;

    let decade = sex.map(|s| decade_luck(pillars, s, policy, cache));
    let annual = as_of.map(|t| {
        annual_luck(
            t,
            pillars.day.stem_branch,
            config.annual_radius,
            policy,
            cache,
        )
    });
    let current = annual
        .as_ref()
        .map(|a| current_luck(pillars, decade.as_ref(), a));

    if let Some(d) = &decade {
        debug!(
            direction = ?d.start.direction,
            boundary = %d.start.boundary.term,
            elapsed_days = d.start.age.elapsed_days,
            start_age = d.start.age.years,
            "decade luck anchored"
        );
    }

    Ok(LuckCycles {
        decade,
        annual,
        current,
    })
}

//! Pillar assignment under a [`BoundaryPolicy`].
//!
//! Year and month pillars compare a reference instant (civil or corrected,
//! per `time_reference`) against solved solar terms on the local clock,
//! truncated to the policy's precision. Day and hour pillars read the
//! corrected clock directly.

use chrono::Datelike;
use sizhu_base::{
    Stem, day_stem_branch_from_jdn, hour_stem_branch, month_stem_branch, year_stem_branch,
};
use sizhu_config::{BoundaryPolicy, DayCutover};
use sizhu_time::{CivilTime, corrected_time, julian_day_number};
use tracing::debug;

use crate::pillar_types::{BoundaryRule, Pillar, PillarSet, ReferenceInstants};
use crate::solar_term::{SectionalWindow, TermCache, boundary_passed};
use crate::solar_term_types::{SolarTerm, SolarTermEvent};

/// Civil and corrected birth instants under the policy's correction mode.
pub fn reference_instants(
    civil: &CivilTime,
    longitude_deg: f64,
    policy: &BoundaryPolicy,
) -> ReferenceInstants {
    let (corrected, correction) = corrected_time(civil, longitude_deg, policy.correction);
    ReferenceInstants {
        civil: *civil,
        corrected,
        correction,
        time_reference: policy.time_reference,
    }
}

/// Pillar year of an instant and the Lichun event that decided it.
pub fn pillar_year(
    instant: &CivilTime,
    policy: &BoundaryPolicy,
    cache: &mut TermCache,
) -> (i32, SolarTermEvent) {
    let year = instant.date().year();
    let unit = policy.precision.unit_seconds();
    let lichun = cache.solve(year, SolarTerm::Lichun, policy.precision);
    let passed = boundary_passed(
        instant.local_ticks(unit),
        lichun.local_ticks(instant.utc_offset_minutes, unit),
        policy.tie_break,
    );
    (if passed { year } else { year - 1 }, lichun)
}

/// Year pillar, returned with its pillar year.
pub fn year_pillar(
    instant: &CivilTime,
    policy: &BoundaryPolicy,
    cache: &mut TermCache,
) -> (i32, Pillar) {
    let (py, pillar, _) = year_pillar_with_boundary(instant, policy, cache);
    (py, pillar)
}

fn year_pillar_with_boundary(
    instant: &CivilTime,
    policy: &BoundaryPolicy,
    cache: &mut TermCache,
) -> (i32, Pillar, SolarTermEvent) {
    let (py, lichun) = pillar_year(instant, policy, cache);
    let rule = BoundaryRule::LichunYear {
        lichun,
        before_lichun: py < instant.date().year(),
    };
    (py, Pillar::new(year_stem_branch(py), rule), lichun)
}

/// Month pillar from the last sectional term the instant has passed.
///
/// `year_stem` is the stem of the year pillar computed for the same instant.
pub fn month_pillar(
    instant: &CivilTime,
    year_stem: Stem,
    policy: &BoundaryPolicy,
    cache: &mut TermCache,
) -> Pillar {
    month_pillar_with_boundary(instant, year_stem, policy, cache).0
}

fn month_pillar_with_boundary(
    instant: &CivilTime,
    year_stem: Stem,
    policy: &BoundaryPolicy,
    cache: &mut TermCache,
) -> (Pillar, SolarTermEvent) {
    let unit = policy.precision.unit_seconds();
    let window = SectionalWindow::build(instant.date().year(), policy.precision, cache);
    let term = window.last_passed(
        instant.local_ticks(unit),
        instant.utc_offset_minutes,
        unit,
        policy.tie_break,
    );
    // window events are sectional: even index, ordinal = index / 2
    let ordinal = term.term.index() / 2;
    let pillar = Pillar::new(
        month_stem_branch(year_stem, ordinal),
        BoundaryRule::SectionalMonth { term, ordinal },
    );
    (pillar, term)
}

/// Day pillar from the corrected clock's date, rolled forward from 23:00
/// under [`DayCutover::H23`].
pub fn day_pillar(corrected: &CivilTime, cutover: DayCutover) -> Pillar {
    let date = corrected.date();
    let rolled = cutover == DayCutover::H23 && corrected.hour() >= 23;
    let jdn = julian_day_number(date.year(), date.month(), date.day()) + i64::from(rolled);
    Pillar::new(
        day_stem_branch_from_jdn(jdn),
        BoundaryRule::CivilDay { cutover, rolled },
    )
}

/// Hour pillar from the corrected clock's hour and the day pillar.
///
/// The 子 slot opens at 23:00 and takes its stem from the day it runs into.
/// Under [`DayCutover::H24`] the day has not rolled yet at 23:00, so the
/// next day's stem is used.
pub fn hour_pillar(corrected: &CivilTime, day: &Pillar) -> Pillar {
    let hour = corrected.hour();
    let rolled = matches!(day.rule, BoundaryRule::CivilDay { rolled: true, .. });
    let slot_day = if hour >= 23 && !rolled {
        day.stem_branch.offset(1)
    } else {
        day.stem_branch
    };
    Pillar::new(
        hour_stem_branch(slot_day.stem, hour),
        BoundaryRule::DoubleHour { hour },
    )
}

/// All pillars of a birth instant.
///
/// `time_known = false` omits the hour pillar; the caller still supplies a
/// representative instant for the other three.
pub fn compute_pillars(
    civil: &CivilTime,
    longitude_deg: f64,
    time_known: bool,
    policy: &BoundaryPolicy,
    cache: &mut TermCache,
) -> PillarSet {
    let instants = reference_instants(civil, longitude_deg, policy);
    let reference = *instants.boundary_instant();

    let (pillar_year, year, year_boundary) = year_pillar_with_boundary(&reference, policy, cache);
    let (month, month_boundary) =
        month_pillar_with_boundary(&reference, year.stem_branch.stem, policy, cache);
    let day = day_pillar(&instants.corrected, policy.day_cutover);
    let hour = time_known.then(|| hour_pillar(&instants.corrected, &day));

    debug!(
        civil = %instants.civil,
        corrected = %instants.corrected,
        pillar_year,
        year = %year.stem_branch,
        month = %month.stem_branch,
        day = %day.stem_branch,
        "assigned pillars"
    );

    PillarSet {
        year,
        month,
        day,
        hour,
        pillar_year,
        year_boundary,
        month_boundary,
        instants,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use sizhu_base::StemBranch;
    use sizhu_config::{CorrectionMode, Precision, TieBreak, TimeReference};

    const SEOUL_LON: f64 = 126.978;

    fn civil(y: i32, mo: u32, d: u32, h: u32, mi: u32, off: i32) -> CivilTime {
        CivilTime::from_ymd_hms(y, mo, d, h, mi, 0, off).unwrap()
    }

    fn civil_at_tick(ticks: i64, unit: i64, off: i32) -> CivilTime {
        let local = DateTime::from_timestamp(ticks * unit, 0).unwrap().naive_utc();
        CivilTime::new(local, off).unwrap()
    }

    fn hanzi(sb: StemBranch) -> String {
        sb.hanzi()
    }

    #[test]
    fn midsummer_seoul_noon() {
        let mut cache = TermCache::new();
        let set = compute_pillars(
            &civil(2024, 6, 21, 12, 0, 540),
            SEOUL_LON,
            true,
            &BoundaryPolicy::default(),
            &mut cache,
        );
        assert_eq!(set.pillar_year, 2024);
        assert_eq!(hanzi(set.year.stem_branch), "甲辰");
        assert_eq!(hanzi(set.month.stem_branch), "庚午");
        assert_eq!(hanzi(set.day.stem_branch), "丙辰");
        assert_eq!(hanzi(set.hour.as_ref().unwrap().stem_branch), "甲午");
        assert!(!set.degraded());
    }

    #[test]
    fn before_lichun_is_previous_year() {
        let mut cache = TermCache::new();
        let set = compute_pillars(
            &civil(2024, 2, 1, 12, 0, 480),
            116.4,
            true,
            &BoundaryPolicy::default(),
            &mut cache,
        );
        assert_eq!(set.pillar_year, 2023);
        assert_eq!(hanzi(set.year.stem_branch), "癸卯");
        assert_eq!(hanzi(set.month.stem_branch), "乙丑");
        match set.year.rule {
            BoundaryRule::LichunYear { before_lichun, .. } => assert!(before_lichun),
            other => panic!("unexpected rule {other:?}"),
        }
    }

    #[test]
    fn early_january_uses_previous_daxue_or_xiaohan() {
        let mut cache = TermCache::new();
        let set = compute_pillars(
            &civil(2024, 1, 2, 12, 0, 480),
            116.4,
            false,
            &BoundaryPolicy::default(),
            &mut cache,
        );
        // Before Xiaohan (Jan 6): still the 子 month of 2023, opened by Daxue
        assert_eq!(hanzi(set.month.stem_branch), "甲子");
        match set.month.rule {
            BoundaryRule::SectionalMonth { term, ordinal } => {
                assert_eq!(term.term, SolarTerm::Daxue);
                assert_eq!(term.year, 2023);
                assert_eq!(ordinal, 10);
            }
            other => panic!("unexpected rule {other:?}"),
        }
        assert!(set.hour.is_none());
    }

    #[test]
    fn tie_break_decides_instant_on_boundary() {
        let mut cache = TermCache::new();
        let after = BoundaryPolicy::default();
        let before = BoundaryPolicy {
            tie_break: TieBreak::Before,
            ..after
        };
        let unit = Precision::Minute.unit_seconds();
        let lichun = cache.solve(2024, SolarTerm::Lichun, Precision::Minute);
        let at = civil_at_tick(lichun.local_ticks(480, unit), unit, 480);

        let (py_after, _) = year_pillar(&at, &after, &mut cache);
        let (py_before, _) = year_pillar(&at, &before, &mut cache);
        assert_eq!(py_after, 2024);
        assert_eq!(py_before, 2023);

        let m_after = month_pillar(&at, year_stem_branch(py_after).stem, &after, &mut cache);
        let m_before = month_pillar(&at, year_stem_branch(py_before).stem, &before, &mut cache);
        assert_eq!(hanzi(m_after.stem_branch), "丙寅");
        assert_eq!(hanzi(m_before.stem_branch), "乙丑");
    }

    #[test]
    fn second_precision_separates_within_a_minute() {
        let mut cache = TermCache::new();
        let policy = BoundaryPolicy {
            precision: Precision::Second,
            tie_break: TieBreak::Before,
            ..BoundaryPolicy::default()
        };
        let lichun = cache.solve(2024, SolarTerm::Lichun, Precision::Second);
        let tick = lichun.local_ticks(480, 1);
        let (a, _) = year_pillar(&civil_at_tick(tick, 1, 480), &policy, &mut cache);
        let (b, _) = year_pillar(&civil_at_tick(tick + 1, 1, 480), &policy, &mut cache);
        assert_eq!((a, b), (2023, 2024));
    }

    #[test]
    fn corrected_reference_moves_boundary_decision() {
        let mut cache = TermCache::new();
        let unit = 60;
        let lichun = cache.solve(2024, SolarTerm::Lichun, Precision::Minute);
        // 20 minutes after Lichun on the civil clock; Seoul's mean solar
        // clock runs about 32 minutes behind UTC+9
        let t = civil_at_tick(lichun.local_ticks(540, unit) + 20, unit, 540);

        let civil_ref = BoundaryPolicy {
            correction: CorrectionMode::Longitude,
            ..BoundaryPolicy::default()
        };
        let corrected_ref = BoundaryPolicy {
            time_reference: TimeReference::Corrected,
            ..civil_ref
        };
        let a = compute_pillars(&t, SEOUL_LON, true, &civil_ref, &mut cache);
        let b = compute_pillars(&t, SEOUL_LON, true, &corrected_ref, &mut cache);
        assert_eq!(a.pillar_year, 2024);
        assert_eq!(b.pillar_year, 2023);
    }

    #[test]
    fn cutover_23_rolls_day() {
        let t = civil(2024, 1, 1, 23, 30, 540);
        let d23 = day_pillar(&t, DayCutover::H23);
        let d24 = day_pillar(&t, DayCutover::H24);
        assert_eq!(hanzi(d23.stem_branch), "乙丑");
        assert_eq!(hanzi(d24.stem_branch), "甲子");
        // either way 23:30 sits in the 子 slot of 乙丑 day
        assert_eq!(hanzi(hour_pillar(&t, &d23).stem_branch), "丙子");
        assert_eq!(hanzi(hour_pillar(&t, &d24).stem_branch), "丙子");
    }

    #[test]
    fn hour_pillars_step_once_per_slot_across_midnight() {
        let readings = [
            civil(2024, 1, 1, 19, 30, 540),
            civil(2024, 1, 1, 21, 30, 540),
            civil(2024, 1, 1, 23, 30, 540),
            civil(2024, 1, 2, 1, 30, 540),
            civil(2024, 1, 2, 3, 30, 540),
        ];
        for cutover in [DayCutover::H23, DayCutover::H24] {
            let hours: Vec<StemBranch> = readings
                .iter()
                .map(|t| hour_pillar(t, &day_pillar(t, cutover)).stem_branch)
                .collect();
            for pair in hours.windows(2) {
                assert_eq!(pair[1], pair[0].offset(1), "{cutover:?}: {hours:?}");
            }
            assert_eq!(hanzi(hours[1]), "乙亥");
            assert_eq!(hanzi(hours[2]), "丙子");
        }

        // 23:30 and 00:30 share the 子 slot and its pillar
        let late = civil(2024, 1, 1, 23, 30, 540);
        let early = civil(2024, 1, 2, 0, 30, 540);
        for cutover in [DayCutover::H23, DayCutover::H24] {
            assert_eq!(
                hour_pillar(&late, &day_pillar(&late, cutover)).stem_branch,
                hour_pillar(&early, &day_pillar(&early, cutover)).stem_branch
            );
        }
    }

    #[test]
    fn cutover_irrelevant_before_23() {
        let t = civil(2024, 1, 1, 22, 59, 540);
        assert_eq!(
            day_pillar(&t, DayCutover::H23).stem_branch,
            day_pillar(&t, DayCutover::H24).stem_branch
        );
    }

    #[test]
    fn no_correction_keeps_civil_clock() {
        let t = civil(2024, 6, 21, 12, 0, 540);
        let r = reference_instants(&t, SEOUL_LON, &BoundaryPolicy::default());
        assert_eq!(r.corrected, r.civil);
        assert_eq!(r.correction.total_minutes(), 0.0);
    }
}

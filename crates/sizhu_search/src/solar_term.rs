//! Solar-term search engine.
//!
//! A solar term is the instant the Sun's apparent ecliptic longitude crosses
//! a multiple of 15°. Crossings are located by bracketing the residual
//! `lon(t) − target` (signed circular difference) around a mean-motion
//! estimate, widening the bracket, then falling back to a coarse scan, and
//! finally bisecting to the policy's precision.
//!
//! Solved events are memoised in a [`TermCache`] that belongs to exactly one
//! chart computation. The cache is a plain value passed by `&mut`; there is
//! no process-wide state.

use std::collections::HashMap;

use sizhu_config::{Precision, TieBreak};
use sizhu_frames::{
    SUN_MEAN_MOTION_DEG_PER_DAY, apparent_solar_longitude_deg, signed_difference_deg,
};
use sizhu_time::{calendar_to_jd, jd_to_calendar};
use tracing::{debug, warn};

use crate::error::SearchError;
use crate::solar_term_types::{Crossing, SolarTerm, SolarTermConfig, SolarTermEvent, TermSet};

/// Largest residual jump accepted between two scan samples. Anything bigger
/// is the ±180° wrap of the circular difference, not a crossing.
const MAX_SCAN_JUMP_DEG: f64 = 90.0;

// ---------------------------------------------------------------------------
// Residual and root finding
// ---------------------------------------------------------------------------

/// `lon(t) − target` with an evaluation counter.
struct LongitudeResidual {
    target_deg: f64,
    evaluations: u32,
}

impl LongitudeResidual {
    fn at(&mut self, jd_ut: f64) -> f64 {
        self.evaluations += 1;
        signed_difference_deg(apparent_solar_longitude_deg(jd_ut), self.target_deg)
    }
}

/// The residual rises through zero between `f_a` and `f_b` without wrapping.
fn is_rising_bracket(f_a: f64, f_b: f64) -> bool {
    f_a <= 0.0 && f_b >= 0.0 && f_b - f_a < 180.0
}

/// Bisect a rising bracket `[t_a, t_b]` until narrower than `tolerance_days`.
fn bisect_rising(
    mut t_a: f64,
    mut t_b: f64,
    tolerance_days: f64,
    max_iter: u32,
    residual: &mut LongitudeResidual,
) -> f64 {
    for _ in 0..max_iter {
        if t_b - t_a < tolerance_days {
            break;
        }
        let t_mid = 0.5 * (t_a + t_b);
        if residual.at(t_mid) >= 0.0 {
            t_b = t_mid;
        } else {
            t_a = t_mid;
        }
    }
    0.5 * (t_a + t_b)
}

/// Coarse scan across `center ± scan_window_days` for the rising sign change
/// closest to `center`.
fn scan_for_bracket(
    center: f64,
    config: &SolarTermConfig,
    residual: &mut LongitudeResidual,
) -> Option<(f64, f64)> {
    let step = config.scan_step_hours / 24.0;
    let steps = (2.0 * config.scan_window_days / step).floor() as usize;
    let mut t_prev = center - config.scan_window_days;
    let mut f_prev = residual.at(t_prev);
    let mut best: Option<(f64, f64)> = None;

    for _ in 0..steps {
        let t_curr = t_prev + step;
        let f_curr = residual.at(t_curr);
        if f_prev < 0.0 && f_curr >= 0.0 && (f_curr - f_prev).abs() < MAX_SCAN_JUMP_DEG {
            let closer = match best {
                Some((a, _)) => (t_prev - center).abs() < (a - center).abs(),
                None => true,
            };
            if closer {
                best = Some((t_prev, t_curr));
            }
        }
        t_prev = t_curr;
        f_prev = f_curr;
    }
    best
}

/// Locate the instant the apparent solar longitude crosses `target_deg`
/// nearest to `center_jd_ut`.
///
/// Never fails: if no bracket is found within the configured budgets the
/// center estimate is returned with `degraded = true`.
pub fn find_crossing(
    target_deg: f64,
    center_jd_ut: f64,
    precision: Precision,
    config: &SolarTermConfig,
) -> Crossing {
    let mut residual = LongitudeResidual {
        target_deg,
        evaluations: 0,
    };

    let mut half = config.bracket_days;
    let mut bracket = None;
    loop {
        let (t_a, t_b) = (center_jd_ut - half, center_jd_ut + half);
        if is_rising_bracket(residual.at(t_a), residual.at(t_b)) {
            bracket = Some((t_a, t_b));
            break;
        }
        if half >= config.max_bracket_days {
            break;
        }
        half = (half * 2.0).min(config.max_bracket_days);
    }
    if bracket.is_none() {
        bracket = scan_for_bracket(center_jd_ut, config, &mut residual);
    }

    match bracket {
        Some((t_a, t_b)) => {
            let jd_ut = bisect_rising(
                t_a,
                t_b,
                precision.tolerance_days(),
                config.max_iterations,
                &mut residual,
            );
            Crossing {
                jd_ut,
                evaluations: residual.evaluations,
                degraded: false,
            }
        }
        None => {
            warn!(
                target_deg,
                center_jd_ut,
                evaluations = residual.evaluations,
                "no bracket for solar longitude crossing; using estimate"
            );
            Crossing {
                jd_ut: center_jd_ut,
                evaluations: residual.evaluations,
                degraded: true,
            }
        }
    }
}

/// Mean-motion estimate of a term's crossing in a civil year, counted from
/// March 20.5 UT.
pub fn term_center_estimate(year: i32, term: SolarTerm) -> f64 {
    calendar_to_jd(year, 3, 20.5) + term.equinox_offset_deg() as f64 / SUN_MEAN_MOTION_DEG_PER_DAY
}

// ---------------------------------------------------------------------------
// Per-computation cache
// ---------------------------------------------------------------------------

/// Memo of solved terms keyed by `(year, term, precision)`.
///
/// Build a fresh cache for each chart and thread it through every
/// calculator that needs boundaries.
#[derive(Debug, Clone, Default)]
pub struct TermCache {
    config: SolarTermConfig,
    events: HashMap<(i32, SolarTerm, Precision), SolarTermEvent>,
    hits: u32,
    misses: u32,
}

impl TermCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache whose misses are solved with a custom search budget.
    pub fn with_config(config: SolarTermConfig) -> Result<Self, SearchError> {
        config.validate().map_err(SearchError::InvalidConfig)?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &SolarTermConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    pub fn misses(&self) -> u32 {
        self.misses
    }

    /// Solved event for a term of a civil year, solving on first use.
    pub fn solve(&mut self, year: i32, term: SolarTerm, precision: Precision) -> SolarTermEvent {
        let key = (year, term, precision);
        if let Some(event) = self.events.get(&key) {
            self.hits += 1;
            return *event;
        }
        self.misses += 1;

        let longitude_deg = term.longitude_deg() as f64;
        let crossing = find_crossing(
            longitude_deg,
            term_center_estimate(year, term),
            precision,
            &self.config,
        );
        debug!(
            year,
            term = %term,
            jd_ut = crossing.jd_ut,
            evaluations = crossing.evaluations,
            degraded = crossing.degraded,
            "solved solar term"
        );
        let event = SolarTermEvent {
            term,
            year,
            longitude_deg,
            jd_ut: crossing.jd_ut,
            degraded: crossing.degraded,
        };
        self.events.insert(key, event);
        event
    }
}

// ---------------------------------------------------------------------------
// Public queries
// ---------------------------------------------------------------------------

/// Solved terms of one civil year, sorted by time.
pub fn build_solar_terms(
    year: i32,
    set: TermSet,
    precision: Precision,
    cache: &mut TermCache,
) -> Vec<SolarTermEvent> {
    let mut events: Vec<SolarTermEvent> = set
        .terms()
        .iter()
        .map(|&term| cache.solve(year, term, precision))
        .collect();
    events.sort_by(|a, b| a.jd_ut.total_cmp(&b.jd_ut));
    events
}

/// First term of `set` strictly after `after_jd_ut`.
pub fn next_solar_term(
    after_jd_ut: f64,
    set: TermSet,
    precision: Precision,
    cache: &mut TermCache,
) -> Option<SolarTermEvent> {
    let (year, _, _) = jd_to_calendar(after_jd_ut);
    [year, year + 1].into_iter().find_map(|y| {
        build_solar_terms(y, set, precision, cache)
            .into_iter()
            .find(|e| e.jd_ut > after_jd_ut)
    })
}

/// Last term of `set` at or before `before_jd_ut`.
pub fn prev_solar_term(
    before_jd_ut: f64,
    set: TermSet,
    precision: Precision,
    cache: &mut TermCache,
) -> Option<SolarTermEvent> {
    let (year, _, _) = jd_to_calendar(before_jd_ut);
    [year, year - 1].into_iter().find_map(|y| {
        build_solar_terms(y, set, precision, cache)
            .into_iter()
            .rev()
            .find(|e| e.jd_ut <= before_jd_ut)
    })
}

/// Whether an instant at `instant_ticks` has entered the period that opens
/// at `boundary_ticks`.
///
/// An instant on the boundary tick belongs to the new period under
/// [`TieBreak::After`] and to the old one under [`TieBreak::Before`].
pub fn boundary_passed(instant_ticks: i64, boundary_ticks: i64, tie_break: TieBreak) -> bool {
    match tie_break {
        TieBreak::After => instant_ticks >= boundary_ticks,
        TieBreak::Before => instant_ticks > boundary_ticks,
    }
}

/// Sectional terms bracketing a civil year: the previous year's Daxue, the
/// year's 12 sectional terms, and the next year's Xiaohan, in time order.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionalWindow {
    earliest: SolarTermEvent,
    latest: SolarTermEvent,
    events: Vec<SolarTermEvent>,
}

impl SectionalWindow {
    pub fn build(year: i32, precision: Precision, cache: &mut TermCache) -> Self {
        let earliest = cache.solve(year - 1, SolarTerm::Daxue, precision);
        let latest = cache.solve(year + 1, SolarTerm::Xiaohan, precision);
        let mut events = Vec::with_capacity(14);
        events.push(earliest);
        events.extend(build_solar_terms(year, TermSet::Sectional, precision, cache));
        events.push(latest);
        Self {
            earliest,
            latest,
            events,
        }
    }

    pub fn events(&self) -> &[SolarTermEvent] {
        &self.events
    }

    /// Most recent boundary the instant has passed under `tie_break`.
    ///
    /// Falls back to the window's earliest event for instants before it.
    pub fn last_passed(
        &self,
        instant_ticks: i64,
        utc_offset_minutes: i32,
        unit_seconds: i64,
        tie_break: TieBreak,
    ) -> SolarTermEvent {
        self.events
            .iter()
            .rev()
            .find(|e| {
                boundary_passed(
                    instant_ticks,
                    e.local_ticks(utc_offset_minutes, unit_seconds),
                    tie_break,
                )
            })
            .copied()
            .unwrap_or(self.earliest)
    }

    /// First boundary the instant has not yet passed under `tie_break`.
    ///
    /// Falls back to the window's latest event for instants after it.
    pub fn first_pending(
        &self,
        instant_ticks: i64,
        utc_offset_minutes: i32,
        unit_seconds: i64,
        tie_break: TieBreak,
    ) -> SolarTermEvent {
        self.events
            .iter()
            .find(|e| {
                !boundary_passed(
                    instant_ticks,
                    e.local_ticks(utc_offset_minutes, unit_seconds),
                    tie_break,
                )
            })
            .copied()
            .unwrap_or(self.latest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solar_term_types::MAX_BRACKET_HALF_WIDTH_DAYS;

    #[test]
    fn rising_bracket_requires_sign_change() {
        assert!(is_rising_bracket(-3.0, 4.0));
        assert!(is_rising_bracket(0.0, 4.0));
        assert!(!is_rising_bracket(1.0, 4.0));
        assert!(!is_rising_bracket(-3.0, -1.0));
        // wrap from +179 to -179 is not a crossing, and the reverse spans 358°
        assert!(!is_rising_bracket(179.0, -179.0));
        assert!(!is_rising_bracket(-179.0, 179.0));
    }

    #[test]
    fn boundary_passed_tie_break() {
        assert!(boundary_passed(10, 10, TieBreak::After));
        assert!(!boundary_passed(10, 10, TieBreak::Before));
        assert!(boundary_passed(11, 10, TieBreak::Before));
        assert!(!boundary_passed(9, 10, TieBreak::After));
    }

    #[test]
    fn estimate_near_known_dates() {
        // Lichun ≈ Feb 4, Xiazhi ≈ Jun 21, Xiaohan ≈ Jan 5
        let lichun = term_center_estimate(2024, SolarTerm::Lichun);
        assert!((lichun - calendar_to_jd(2024, 2, 4.0)).abs() < 3.0);
        let xiazhi = term_center_estimate(2024, SolarTerm::Xiazhi);
        assert!((xiazhi - calendar_to_jd(2024, 6, 21.0)).abs() < 3.0);
        let xiaohan = term_center_estimate(2024, SolarTerm::Xiaohan);
        assert!((xiaohan - calendar_to_jd(2024, 1, 6.0)).abs() < 3.0);
    }

    #[test]
    fn crossing_hits_target_longitude() {
        let config = SolarTermConfig::default();
        let c = find_crossing(
            90.0,
            term_center_estimate(2024, SolarTerm::Xiazhi),
            Precision::Second,
            &config,
        );
        assert!(!c.degraded);
        let lon = apparent_solar_longitude_deg(c.jd_ut);
        assert!(signed_difference_deg(lon, 90.0).abs() < 1e-4, "lon = {lon}");
    }

    #[test]
    fn crossing_found_from_poor_estimate_by_widening() {
        let config = SolarTermConfig::default();
        let good = find_crossing(0.0, calendar_to_jd(2024, 3, 20.0), Precision::Second, &config);
        let far = find_crossing(0.0, calendar_to_jd(2024, 3, 20.0) + 30.0, Precision::Second, &config);
        assert!(!far.degraded);
        assert!((good.jd_ut - far.jd_ut).abs() < 2.0 / 86_400.0);
    }

    #[test]
    fn crossing_found_by_scan_fallback() {
        let config = SolarTermConfig {
            bracket_days: 1.0,
            max_bracket_days: 2.0,
            ..SolarTermConfig::default()
        };
        let c = find_crossing(0.0, calendar_to_jd(2024, 3, 20.0) + 40.0, Precision::Minute, &config);
        assert!(!c.degraded);
        assert!((c.jd_ut - calendar_to_jd(2024, 3, 20.0)).abs() < 1.0);
    }

    #[test]
    fn degraded_when_budgets_exhausted() {
        let config = SolarTermConfig {
            bracket_days: 0.5,
            max_bracket_days: 0.5,
            scan_step_hours: 6.0,
            scan_window_days: 1.0,
            max_iterations: 64,
        };
        let center = calendar_to_jd(2024, 3, 20.0) + 100.0;
        let c = find_crossing(0.0, center, Precision::Minute, &config);
        assert!(c.degraded);
        assert_eq!(c.jd_ut, center);
    }

    #[test]
    fn minute_precision_within_a_minute_of_second_precision() {
        let config = SolarTermConfig::default();
        let center = term_center_estimate(2024, SolarTerm::Lichun);
        let m = find_crossing(315.0, center, Precision::Minute, &config);
        let s = find_crossing(315.0, center, Precision::Second, &config);
        assert!((m.jd_ut - s.jd_ut).abs() < 60.0 / 86_400.0);
    }

    #[test]
    fn cache_hits_on_repeat() {
        let mut cache = TermCache::new();
        let a = cache.solve(2024, SolarTerm::Lichun, Precision::Minute);
        let b = cache.solve(2024, SolarTerm::Lichun, Precision::Minute);
        assert_eq!(a, b);
        assert_eq!((cache.hits(), cache.misses()), (1, 1));
        cache.solve(2024, SolarTerm::Lichun, Precision::Second);
        assert_eq!(cache.misses(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn cache_rejects_invalid_config() {
        let config = SolarTermConfig {
            max_iterations: 0,
            ..SolarTermConfig::default()
        };
        assert!(matches!(
            TermCache::with_config(config),
            Err(SearchError::InvalidConfig(_))
        ));
    }

    #[test]
    fn widest_bracket_stays_on_requested_year() {
        let config = SolarTermConfig {
            bracket_days: MAX_BRACKET_HALF_WIDTH_DAYS,
            max_bracket_days: MAX_BRACKET_HALF_WIDTH_DAYS,
            ..SolarTermConfig::default()
        };
        let mut cache = TermCache::with_config(config).unwrap();
        let e = cache.solve(2024, SolarTerm::Lichun, Precision::Minute);
        assert!(!e.degraded);
        assert!((e.jd_ut - calendar_to_jd(2024, 2, 4.35)).abs() < 0.5);

        let year_wide = SolarTermConfig {
            bracket_days: 100.0,
            max_bracket_days: 400.0,
            ..SolarTermConfig::default()
        };
        assert!(TermCache::with_config(year_wide).is_err());
    }

    #[test]
    fn window_spans_year_edges() {
        let mut cache = TermCache::new();
        let w = SectionalWindow::build(2024, Precision::Minute, &mut cache);
        assert_eq!(w.events().len(), 14);
        assert_eq!(w.events()[0].term, SolarTerm::Daxue);
        assert_eq!(w.events()[0].year, 2023);
        assert_eq!(w.events()[13].term, SolarTerm::Xiaohan);
        assert_eq!(w.events()[13].year, 2025);
        for pair in w.events().windows(2) {
            assert!(pair[0].jd_ut < pair[1].jd_ut);
        }
    }
}

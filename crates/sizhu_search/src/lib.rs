//! Boundary search engine for the sizhu four-pillars calendar.
//!
//! This crate provides:
//! - Solar-term root finding on the apparent solar longitude, with a
//!   per-computation memo cache
//! - Year/month/day/hour pillar assignment under a `BoundaryPolicy`
//! - Decade and annual luck cycles anchored to the same boundaries

pub mod error;
pub mod luck;
pub mod luck_types;
pub mod pillar;
pub mod pillar_types;
pub mod solar_term;
pub mod solar_term_types;

pub use error::SearchError;
pub use luck::{annual_luck, compute_luck, current_luck, decade_luck, luck_start};
pub use luck_types::{
    AnnualWindow, CurrentLuck, DEFAULT_ANNUAL_RADIUS, DecadeCycle, LuckConfig, LuckCycles,
    LuckStart,
};
pub use pillar::{
    compute_pillars, day_pillar, hour_pillar, month_pillar, pillar_year, reference_instants,
    year_pillar,
};
pub use pillar_types::{BoundaryRule, Pillar, PillarSet, ReferenceInstants};
pub use solar_term::{
    SectionalWindow, TermCache, boundary_passed, build_solar_terms, find_crossing,
    next_solar_term, prev_solar_term, term_center_estimate,
};
pub use solar_term_types::{
    ALL_SOLAR_TERMS, Crossing, MAX_BRACKET_HALF_WIDTH_DAYS, MAX_SCAN_STEP_HOURS,
    MAX_SCAN_WINDOW_DAYS, SECTIONAL_TERMS, SolarTerm, SolarTermConfig, SolarTermEvent, TermSet,
};

//! Convenience wrapper for the sizhu four-pillars calendar engine.
//!
//! One call turns a validated birth record into a [`Chart`]: pillars with
//! their driving solar terms, ten-deity relations, five-element counts and
//! luck cycles. Every computation builds its own solar-term cache, so
//! concurrent calls share nothing.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use chrono::{NaiveDate, NaiveTime};
//! use sizhu_rs::*;
//!
//! let input = BirthInput::new(
//!     NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
//!     NaiveTime::from_hms_opt(8, 30, 0),
//!     Location::named("seoul")?,
//! )
//! .with_sex(Sex::Female);
//!
//! let chart = compute_chart(&input)?;
//! println!("{} {} {}", chart.year.stem_branch, chart.month.stem_branch, chart.day.stem_branch);
//! ```

pub mod chart;
pub mod error;
pub mod input;
pub mod location;

pub use chart::{
    AuditedTerm, Chart, ChartAudit, PillarDeities, TenDeityMap, compute_chart, compute_chart_now,
};
pub use error::{InputError, SizhuError};
pub use input::{BirthInput, MAX_SUPPORTED_YEAR, MIN_SUPPORTED_YEAR};
pub use location::Location;

// Re-export the types a chart is built from so callers need only this crate.
pub use sizhu_base::{
    AnnualLuck, Branch, DecadeLuck, Element, FiveElementTally, LuckDirection, LuckStartAge, Sex,
    Stem, StemBranch, TenDeity,
};
pub use sizhu_config::{
    BoundaryPolicy, ConfigError, CorrectionMode, DayCutover, Precision, TieBreak, TimeReference,
};
pub use sizhu_search::{
    AnnualWindow, BoundaryRule, CurrentLuck, DecadeCycle, LuckConfig, LuckCycles, LuckStart,
    Pillar, SearchError, SolarTerm, SolarTermEvent,
};
pub use sizhu_time::{CivilTime, TimeCorrection, TimeError};

//! Configuration types for the sizhu four-pillars engine.
//!
//! This crate provides:
//! - [`BoundaryPolicy`], the closed set of boundary decisions a chart is
//!   computed under
//! - String and TOML parsing with eager rejection of unknown values

pub mod error;
pub mod policy;

pub use error::ConfigError;
pub use policy::{BoundaryPolicy, CorrectionMode, DayCutover, Precision, TieBreak, TimeReference};

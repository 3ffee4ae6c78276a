//! Error types for the convenience wrapper.

use sizhu_config::ConfigError;
use sizhu_search::SearchError;
use sizhu_time::TimeError;
use thiserror::Error;

/// Malformed or out-of-range chart input, rejected before any computation.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum InputError {
    #[error("longitude {0}° is outside [-180, 180]")]
    Longitude(f64),
    #[error("UTC offset of {0} minutes is outside ±14h")]
    UtcOffset(i32),
    #[error("year {0} is outside the supported range 1800..=2200")]
    YearOutOfRange(i32),
    #[error("unknown location preset {0:?}")]
    UnknownLocation(String),
}

/// Unified error type for chart computation.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SizhuError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Time(#[from] TimeError),
    #[error(transparent)]
    Search(#[from] SearchError),
}

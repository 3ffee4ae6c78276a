//! Error types for civil time handling.

use thiserror::Error;

/// Errors from civil instant construction and conversion.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// UTC offset outside ±14 hours.
    #[error("UTC offset of {0} minutes is outside ±14h")]
    InvalidOffset(i32),
    /// The instant cannot be represented as a calendar date.
    #[error("instant out of range: {0}")]
    OutOfRange(&'static str),
}

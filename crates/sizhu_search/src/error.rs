//! Error types for the search crate.

use thiserror::Error;

/// Errors from solar-term and luck-cycle searches.
///
/// Failing to bracket a crossing is not an error: the solver degrades to its
/// initial estimate and flags the event instead.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SearchError {
    /// A search configuration parameter is out of range.
    #[error("invalid search config: {0}")]
    InvalidConfig(&'static str),
}

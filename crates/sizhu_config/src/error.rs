//! Error types for policy configuration.

use thiserror::Error;

/// Errors raised while parsing or validating a boundary policy.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A policy field received a value outside its recognised set.
    #[error("unknown value {value:?} for {field}")]
    UnknownValue { field: &'static str, value: String },
    /// The TOML document could not be parsed into a policy.
    #[error("policy parse error: {0}")]
    Parse(String),
}

impl ConfigError {
    pub(crate) fn unknown(field: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownValue {
            field,
            value: value.into(),
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

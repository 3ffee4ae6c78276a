//! Boundary policy: how a birth instant is compared against calendar
//! boundaries.
//!
//! Every field is a closed enum. String forms are accepted through `FromStr`
//! (and therefore through serde), and anything outside the recognised set is
//! rejected with [`ConfigError::UnknownValue`] instead of being coerced.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which clock is compared against solar-term boundary instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TimeReference {
    /// Local civil clock as entered.
    #[default]
    Civil,
    /// Civil clock after the configured solar-time correction.
    Corrected,
}

impl TimeReference {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Civil => "civil",
            Self::Corrected => "corrected",
        }
    }
}

impl FromStr for TimeReference {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "civil" => Ok(Self::Civil),
            "corrected" | "solar" => Ok(Self::Corrected),
            _ => Err(ConfigError::unknown("time_reference", s)),
        }
    }
}

/// Granularity at which instants are compared and at which the solver stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Precision {
    #[default]
    Minute,
    Second,
}

impl Precision {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Minute => "minute",
            Self::Second => "second",
        }
    }

    /// Length of one comparison unit in seconds.
    pub const fn unit_seconds(self) -> i64 {
        match self {
            Self::Minute => 60,
            Self::Second => 1,
        }
    }

    /// Bisection stops once the bracket is narrower than this many days.
    pub fn tolerance_days(self) -> f64 {
        self.unit_seconds() as f64 / 86_400.0
    }
}

impl FromStr for Precision {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minute" | "min" => Ok(Self::Minute),
            "second" | "sec" => Ok(Self::Second),
            _ => Err(ConfigError::unknown("precision", s)),
        }
    }
}

/// Resolution of an instant that coincides with a boundary at the policy's
/// precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TieBreak {
    /// The instant still belongs to the period that ends at the boundary.
    Before,
    /// The instant already belongs to the period that starts at the boundary.
    #[default]
    After,
}

impl TieBreak {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
        }
    }

    pub const fn flipped(self) -> Self {
        match self {
            Self::Before => Self::After,
            Self::After => Self::Before,
        }
    }
}

impl FromStr for TieBreak {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "before" => Ok(Self::Before),
            "after" => Ok(Self::After),
            _ => Err(ConfigError::unknown("tie_break", s)),
        }
    }
}

/// Local hour at which the day pillar advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DayCutover {
    /// The day turns at 23:00, the start of the zi hour.
    #[default]
    H23,
    /// The day turns at midnight.
    H24,
}

impl DayCutover {
    pub const fn hour(self) -> u8 {
        match self {
            Self::H23 => 23,
            Self::H24 => 24,
        }
    }
}

impl TryFrom<u8> for DayCutover {
    type Error = ConfigError;

    fn try_from(hour: u8) -> Result<Self, Self::Error> {
        match hour {
            23 => Ok(Self::H23),
            24 | 0 => Ok(Self::H24),
            _ => Err(ConfigError::unknown("day_cutover", hour.to_string())),
        }
    }
}

impl From<DayCutover> for u8 {
    fn from(c: DayCutover) -> Self {
        c.hour()
    }
}

impl FromStr for DayCutover {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hour: u8 = s
            .trim()
            .trim_end_matches(":00")
            .parse()
            .map_err(|_| ConfigError::unknown("day_cutover", s))?;
        Self::try_from(hour)
    }
}

/// Which corrections turn the civil clock into local solar time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CorrectionMode {
    #[default]
    None,
    /// Mean solar time: longitude offset from the zone's reference meridian.
    Longitude,
    /// Apparent solar time: longitude offset plus equation of time.
    LongitudeAndEquationOfTime,
}

impl CorrectionMode {
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Longitude => "longitude",
            Self::LongitudeAndEquationOfTime => "longitude+eot",
        }
    }

    pub const fn applies_longitude(self) -> bool {
        matches!(self, Self::Longitude | Self::LongitudeAndEquationOfTime)
    }

    pub const fn applies_equation_of_time(self) -> bool {
        matches!(self, Self::LongitudeAndEquationOfTime)
    }
}

impl FromStr for CorrectionMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "off" => Ok(Self::None),
            "longitude" | "lmt" => Ok(Self::Longitude),
            "longitude+eot" | "longitude+equation_of_time" | "longitude_eot" | "lat" => {
                Ok(Self::LongitudeAndEquationOfTime)
            }
            _ => Err(ConfigError::unknown("correction", s)),
        }
    }
}

macro_rules! string_serde {
    ($($ty:ty),*) => {$(
        impl TryFrom<String> for $ty {
            type Error = ConfigError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl From<$ty> for String {
            fn from(v: $ty) -> Self {
                v.name().to_string()
            }
        }

        impl Display for $ty {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    )*};
}

string_serde!(TimeReference, Precision, TieBreak, CorrectionMode);

/// The complete set of boundary decisions applied to one chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoundaryPolicy {
    pub time_reference: TimeReference,
    pub precision: Precision,
    pub tie_break: TieBreak,
    pub day_cutover: DayCutover,
    pub correction: CorrectionMode,
}

#[derive(Deserialize)]
struct PolicyDocument {
    policy: BoundaryPolicy,
}

impl BoundaryPolicy {
    /// Parse a `[policy]` table from a TOML document.
    ///
    /// Missing fields take their defaults; unknown fields and unrecognised
    /// values are rejected.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let doc: PolicyDocument = toml::from_str(content)?;
        Ok(doc.policy)
    }

    /// Every combination of policy values, for exhaustive sweeps.
    pub fn all_combinations() -> Vec<Self> {
        let mut out = Vec::with_capacity(48);
        for time_reference in [TimeReference::Civil, TimeReference::Corrected] {
            for precision in [Precision::Minute, Precision::Second] {
                for tie_break in [TieBreak::Before, TieBreak::After] {
                    for day_cutover in [DayCutover::H23, DayCutover::H24] {
                        for correction in [
                            CorrectionMode::None,
                            CorrectionMode::Longitude,
                            CorrectionMode::LongitudeAndEquationOfTime,
                        ] {
                            out.push(Self {
                                time_reference,
                                precision,
                                tie_break,
                                day_cutover,
                                correction,
                            });
                        }
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy() {
        let p = BoundaryPolicy::default();
        assert_eq!(p.time_reference, TimeReference::Civil);
        assert_eq!(p.precision, Precision::Minute);
        assert_eq!(p.tie_break, TieBreak::After);
        assert_eq!(p.day_cutover, DayCutover::H23);
        assert_eq!(p.correction, CorrectionMode::None);
    }

    #[test]
    fn parse_names_case_insensitive() {
        assert_eq!("Corrected".parse::<TimeReference>(), Ok(TimeReference::Corrected));
        assert_eq!("SECOND".parse::<Precision>(), Ok(Precision::Second));
        assert_eq!(" before ".parse::<TieBreak>(), Ok(TieBreak::Before));
        assert_eq!(
            "longitude+eot".parse::<CorrectionMode>(),
            Ok(CorrectionMode::LongitudeAndEquationOfTime)
        );
    }

    #[test]
    fn unknown_value_rejected() {
        let err = "nearest".parse::<TieBreak>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownValue { field: "tie_break", .. }));
        assert!("hourly".parse::<Precision>().is_err());
        assert!("sidereal".parse::<CorrectionMode>().is_err());
    }

    #[test]
    fn day_cutover_forms() {
        assert_eq!("23".parse::<DayCutover>(), Ok(DayCutover::H23));
        assert_eq!("24:00".parse::<DayCutover>(), Ok(DayCutover::H24));
        assert_eq!(DayCutover::try_from(0), Ok(DayCutover::H24));
        assert!(DayCutover::try_from(22).is_err());
    }

    #[test]
    fn precision_units() {
        assert_eq!(Precision::Minute.unit_seconds(), 60);
        assert_eq!(Precision::Second.unit_seconds(), 1);
        assert!((Precision::Minute.tolerance_days() * 86_400.0 - 60.0).abs() < 1e-9);
    }

    #[test]
    fn tie_break_flips() {
        assert_eq!(TieBreak::Before.flipped(), TieBreak::After);
        assert_eq!(TieBreak::After.flipped(), TieBreak::Before);
    }

    #[test]
    fn correction_flags() {
        assert!(!CorrectionMode::None.applies_longitude());
        assert!(CorrectionMode::Longitude.applies_longitude());
        assert!(!CorrectionMode::Longitude.applies_equation_of_time());
        assert!(CorrectionMode::LongitudeAndEquationOfTime.applies_equation_of_time());
    }

    #[test]
    fn all_combinations_distinct() {
        let all = BoundaryPolicy::all_combinations();
        assert_eq!(all.len(), 48);
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn toml_policy_roundtrip_fields() {
        let doc = r#"
            [policy]
            time_reference = "corrected"
            precision = "second"
            tie_break = "before"
            day_cutover = 24
            correction = "longitude"
        "#;
        let p = BoundaryPolicy::from_toml_str(doc).unwrap();
        assert_eq!(p.time_reference, TimeReference::Corrected);
        assert_eq!(p.precision, Precision::Second);
        assert_eq!(p.tie_break, TieBreak::Before);
        assert_eq!(p.day_cutover, DayCutover::H24);
        assert_eq!(p.correction, CorrectionMode::Longitude);
    }

    #[test]
    fn toml_missing_fields_default() {
        let p = BoundaryPolicy::from_toml_str("[policy]\nprecision = \"second\"\n").unwrap();
        assert_eq!(p.precision, Precision::Second);
        assert_eq!(p.tie_break, TieBreak::After);
    }

    #[test]
    fn toml_unknown_value_rejected() {
        let err = BoundaryPolicy::from_toml_str("[policy]\ntie_break = \"sometimes\"\n");
        assert!(matches!(err, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn toml_unknown_field_rejected() {
        let err = BoundaryPolicy::from_toml_str("[policy]\ntimezone = \"KST\"\n");
        assert!(err.is_err());
    }
}

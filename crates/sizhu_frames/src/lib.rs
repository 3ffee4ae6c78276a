//! Solar ephemeris for the sizhu engine.
//!
//! Provides the apparent geocentric ecliptic longitude of the Sun from a
//! closed-form low-order theory, plus the angle helpers the solar-term
//! solver works with.

pub mod angle;
pub mod nutation;
pub mod sun;

pub use angle::{normalize_360, signed_difference_deg};
pub use nutation::{moon_node_longitude_deg, nutation_arcsec};
pub use sun::{
    SUN_MEAN_MOTION_DEG_PER_DAY, SolarPosition, apparent_solar_longitude_deg, solar_position_tt,
};

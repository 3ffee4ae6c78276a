//! Apparent geocentric ecliptic longitude of the Sun.
//!
//! Closed-form low-order theory: mean longitude and mean anomaly
//! polynomials, the equation of the centre, annual aberration and nutation
//! in longitude. Accuracy is about 0.01° (a quarter hour of solar motion)
//! over 1800–2200, well inside the day-scale brackets the solar-term solver
//! starts from; the solver refines crossings of this function, so results are
//! self-consistent to the requested precision.
//!
//! Source: Meeus, Astronomical Algorithms, Ch. 25. Public domain.

use sizhu_time::{jd_to_centuries, jd_ut_to_tt};

use crate::angle::normalize_360;
use crate::nutation::nutation_arcsec;

/// Constant of aberration, arcseconds.
const ABERRATION_ARCSEC: f64 = 20.4898;

/// Mean daily motion of the Sun in longitude, degrees/day.
pub const SUN_MEAN_MOTION_DEG_PER_DAY: f64 = 360.0 / 365.242_19;

/// Intermediate quantities of the solar theory at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    /// Geometric mean longitude, degrees [0, 360).
    pub mean_longitude_deg: f64,
    /// Mean anomaly, degrees [0, 360).
    pub mean_anomaly_deg: f64,
    /// Equation of the centre, degrees.
    pub equation_of_center_deg: f64,
    /// True geometric longitude, degrees [0, 360).
    pub true_longitude_deg: f64,
    /// Sun–Earth distance, AU.
    pub distance_au: f64,
    /// Nutation in longitude, arcseconds.
    pub nutation_arcsec: f64,
    /// Apparent longitude (true + nutation + aberration), degrees [0, 360).
    pub apparent_longitude_deg: f64,
}

/// Full solar position at a TT Julian Date.
pub fn solar_position_tt(jd_tt: f64) -> SolarPosition {
    let t = jd_to_centuries(jd_tt);
    let t2 = t * t;

    let l0 = normalize_360(280.46646 + 36_000.76983 * t + 0.000_303_2 * t2);
    let m = normalize_360(357.52911 + 35_999.05029 * t - 0.000_153_7 * t2);
    let m_rad = m.to_radians();

    let c = (1.914_602 - 0.004_817 * t - 0.000_014 * t2) * m_rad.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m_rad).sin()
        + 0.000_289 * (3.0 * m_rad).sin();

    let true_lon = normalize_360(l0 + c);

    let e = 0.016_708_634 - 0.000_042_037 * t - 0.000_000_126_7 * t2;
    let nu = (m + c).to_radians();
    let distance_au = 1.000_001_018 * (1.0 - e * e) / (1.0 + e * nu.cos());

    let (dpsi, _deps) = nutation_arcsec(t);
    let aberration = -ABERRATION_ARCSEC / distance_au;
    let apparent = normalize_360(true_lon + (dpsi + aberration) / 3600.0);

    SolarPosition {
        mean_longitude_deg: l0,
        mean_anomaly_deg: m,
        equation_of_center_deg: c,
        true_longitude_deg: true_lon,
        distance_au,
        nutation_arcsec: dpsi,
        apparent_longitude_deg: apparent,
    }
}

/// Apparent solar ecliptic longitude in degrees [0, 360) at a UT Julian Date.
pub fn apparent_solar_longitude_deg(jd_ut: f64) -> f64 {
    solar_position_tt(jd_ut_to_tt(jd_ut)).apparent_longitude_deg
}

//! Angle normalisation helpers.

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs
    if r >= 360.0 { 0.0 } else { r }
}

/// Signed shortest circular difference `a − b`, in (−180, 180] degrees.
///
/// Never the naive difference: 1° − 359° is +2°, not −358°.
pub fn signed_difference_deg(a: f64, b: f64) -> f64 {
    let d = normalize_360(a - b);
    if d > 180.0 { d - 360.0 } else { d }
}

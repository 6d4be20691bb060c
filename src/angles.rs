//! Degree normalisation helpers shared by the direction-based calculators.

/// Normalize an angle in degrees into `[0, 360)`.
///
/// Accepts any finite input, including large multiples of a full turn.
pub fn normalize_degrees(angle_deg: f64) -> f64 {
    let wrapped = angle_deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Wrap an angle in degrees into `(-180, 180]`.
pub fn wrap_signed_degrees(angle_deg: f64) -> f64 {
    let normalized = normalize_degrees(angle_deg);
    if normalized > 180.0 {
        normalized - 360.0
    } else {
        normalized
    }
}

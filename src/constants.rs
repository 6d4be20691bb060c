/// Physical constants and unit conversions used by the MFD calculators

/// Gravitational acceleration in m/s²
pub const G_ACCEL_MPS2: f64 = 9.80665;

/// Conversion factor: knots to meters per second
pub const KTS_TO_MPS: f64 = 0.514444;

/// Conversion factor: meters to feet
pub const M_TO_FT: f64 = 3.28084;

/// Feet per nautical mile
pub const NM_TO_FT: f64 = 6076.12;

/// Vertical speed factor for a flight path angle tangent
///
/// Converts `groundspeed_kts * tan(gamma)` into feet per minute.
/// Value: 60 / (6076.12 * π/180) ≈ 101.27, kept at the rounded value the
/// display has always shown.
pub const VS_FACTOR_FPM_PER_KT: f64 = 101.27;

/// Standard rate turn in degrees per second
pub const STANDARD_RATE_DPS: f64 = 3.0;

/// Reference path angle used for top of descent (degrees)
pub const TOD_PATH_DEG: f64 = 3.0;

/// Steep (emergency / high drag) descent reference angle (degrees)
pub const STEEP_PATH_DEG: f64 = 5.0;

// Limits

/// Largest bank angle magnitude accepted by the turn calculator (degrees)
pub const MAX_BANK_DEG: f64 = 85.0;

/// Below this |tan(bank)| the aircraft is treated as wings level
pub const WINGS_LEVEL_TAN: f64 = 0.001;

/// Minimum turn rate (deg/s) for which time-to-turn is meaningful
pub const MIN_TURN_RATE_DPS: f64 = 0.01;

/// Floor applied to the VNAV distance before dividing by it (nm)
pub const MIN_DISTANCE_NM: f64 = 0.01;

/// Floor applied to the VNAV groundspeed before dividing by it (knots)
pub const MIN_GROUNDSPEED_KTS: f64 = 1.0;

/// Altitude changes at or below this magnitude are "level" (feet)
pub const LEVEL_ALTITUDE_FT: f64 = 10.0;

/// Vertical speeds at or below this magnitude are "level" (ft/min)
pub const LEVEL_VS_FPM: f64 = 10.0;

// Sentinels
//
// Displayed in place of undefined values (division by ~0, no turn).
// Consumers read them as "effectively infinite".

/// Generic "effectively infinite" display value
pub const SENTINEL_INFINITE: f64 = 999.9;

/// Wings-level turn radius in feet
pub const SENTINEL_RADIUS_FT: f64 = 999_900.0;

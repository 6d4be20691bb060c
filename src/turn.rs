//! Level turn performance: radius, rate, lead distance, load factor and
//! the bank angle for a standard rate turn.

use clap::Args;
use serde::Serialize;
use tracing::debug;

use crate::cli_api::{finite_f64, fixed2, Calculator};
use crate::constants::{
    G_ACCEL_MPS2, KTS_TO_MPS, MAX_BANK_DEG, MIN_TURN_RATE_DPS, M_TO_FT, NM_TO_FT,
    SENTINEL_INFINITE, SENTINEL_RADIUS_FT, STANDARD_RATE_DPS, WINGS_LEVEL_TAN,
};
use crate::error::CalcError;

/// Positional inputs of the turn calculator
#[derive(Args, Debug, Clone, Copy, PartialEq)]
pub struct TurnInputs {
    /// True airspeed (knots)
    #[arg(value_parser = finite_f64, allow_negative_numbers = true)]
    pub tas_kts: f64,

    /// Bank angle (degrees)
    #[arg(value_parser = finite_f64, allow_negative_numbers = true)]
    pub bank_deg: f64,

    /// Course change required (degrees)
    #[arg(value_parser = finite_f64, allow_negative_numbers = true)]
    pub course_change_deg: f64,
}

/// Turn performance for one bank angle and airspeed
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TurnResult {
    #[serde(serialize_with = "fixed2")]
    pub radius_nm: f64,
    #[serde(serialize_with = "fixed2")]
    pub radius_ft: f64,
    /// Degrees per second, signed like the bank angle
    #[serde(serialize_with = "fixed2")]
    pub turn_rate_dps: f64,
    /// Distance before the fix at which to start rolling
    #[serde(serialize_with = "fixed2")]
    pub lead_distance_nm: f64,
    #[serde(serialize_with = "fixed2")]
    pub lead_distance_ft: f64,
    #[serde(serialize_with = "fixed2")]
    pub time_to_turn_sec: f64,
    /// G-loading in the level turn
    #[serde(serialize_with = "fixed2")]
    pub load_factor: f64,
    /// Bank angle (degrees) giving a 3°/s turn at this airspeed
    #[serde(serialize_with = "fixed2")]
    pub standard_rate_bank: f64,
}

/// Calculate turn performance for a coordinated level turn.
///
/// Formulas:
/// - Turn radius: R = V² / (g * tan φ)
/// - Turn rate: ω = (g * tan φ) / V
/// - Lead distance: L = R * tan(Δψ/2)
/// - Load factor: n = 1 / cos φ
/// - Standard rate bank: φ = atan(ω * V / g) with ω = 3°/s
///
/// Wings level (|tan φ| < 0.001) saturates radius and time to the 999.9
/// sentinels and zeroes rate and lead distance.
///
/// # Arguments
/// * `tas_kts` - True airspeed, knots (> 0)
/// * `bank_deg` - Bank angle, degrees (|φ| ≤ 85)
/// * `course_change_deg` - Course change, degrees (any sign)
pub fn calculate_turn_performance(
    tas_kts: f64,
    bank_deg: f64,
    course_change_deg: f64,
) -> TurnResult {
    let v_mps = tas_kts * KTS_TO_MPS;
    let phi_rad = bank_deg.to_radians();
    let delta_psi_rad = course_change_deg.to_radians();

    let load_factor = 1.0 / phi_rad.cos();

    let omega_std_rad_s = STANDARD_RATE_DPS.to_radians();
    let standard_rate_bank = (omega_std_rad_s * v_mps / G_ACCEL_MPS2).atan().to_degrees();

    let tan_phi = phi_rad.tan();
    if tan_phi.abs() < WINGS_LEVEL_TAN {
        debug!(bank_deg, "wings level, turn radius saturated");
        return TurnResult {
            radius_nm: SENTINEL_INFINITE,
            radius_ft: SENTINEL_RADIUS_FT,
            turn_rate_dps: 0.0,
            lead_distance_nm: 0.0,
            lead_distance_ft: 0.0,
            time_to_turn_sec: SENTINEL_INFINITE,
            load_factor,
            standard_rate_bank,
        };
    }

    let radius_m = v_mps * v_mps / (G_ACCEL_MPS2 * tan_phi);
    let radius_ft = radius_m * M_TO_FT;

    let omega_rad_s = G_ACCEL_MPS2 * tan_phi / v_mps;
    let turn_rate_dps = omega_rad_s.to_degrees();

    let lead_m = radius_m * (delta_psi_rad / 2.0).tan();
    let lead_distance_ft = lead_m * M_TO_FT;

    // Negative bank gives a negative rate; that also falls back to the sentinel
    let time_to_turn_sec = if turn_rate_dps > MIN_TURN_RATE_DPS {
        course_change_deg.abs() / turn_rate_dps
    } else {
        SENTINEL_INFINITE
    };

    TurnResult {
        radius_nm: radius_ft / NM_TO_FT,
        radius_ft,
        turn_rate_dps,
        lead_distance_nm: lead_distance_ft / NM_TO_FT,
        lead_distance_ft,
        time_to_turn_sec,
        load_factor,
        standard_rate_bank,
    }
}

pub struct TurnCalculator;

impl Calculator for TurnCalculator {
    const NAME: &'static str = "turn_calculator";
    const ABOUT: &'static str =
        "Turn performance: radius, rate, lead distance, load factor and standard rate bank";
    const EXAMPLE: &'static str = concat!(
        "Example:\n",
        "  turn_calculator 250 25 90\n",
        "  (250 knots TAS, 25° bank, 90° turn)"
    );

    type Inputs = TurnInputs;
    type Output = TurnResult;

    fn validate(inputs: &TurnInputs) -> Result<(), CalcError> {
        if inputs.tas_kts <= 0.0 {
            return Err(CalcError::domain("TAS must be positive"));
        }
        if inputs.bank_deg.abs() > MAX_BANK_DEG {
            return Err(CalcError::domain("Bank angle must be between -85 and 85 degrees"));
        }
        Ok(())
    }

    fn compute(inputs: &TurnInputs) -> TurnResult {
        calculate_turn_performance(
            inputs.tas_kts,
            inputs.bank_deg,
            inputs.course_change_deg,
        )
    }
}

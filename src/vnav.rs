//! Vertical navigation: path angle, required vertical speed, top of descent
//! and the idle path check for an altitude constraint ahead.

use clap::Args;
use serde::Serialize;
use tracing::debug;

use crate::cli_api::{finite_f64, fixed2, Calculator};
use crate::constants::{
    LEVEL_ALTITUDE_FT, LEVEL_VS_FPM, MIN_DISTANCE_NM, MIN_GROUNDSPEED_KTS, NM_TO_FT,
    SENTINEL_INFINITE, STEEP_PATH_DEG, TOD_PATH_DEG, VS_FACTOR_FPM_PER_KT,
};
use crate::error::CalcError;

// Acceptable path angle bands (degrees) for the idle path check
const IDLE_DESCENT_MIN_DEG: f64 = 2.0;
const IDLE_DESCENT_MAX_DEG: f64 = 4.0;
const CLIMB_MIN_DEG: f64 = 0.5;
const CLIMB_MAX_DEG: f64 = 15.0;

/// Positional inputs of the VNAV calculator
#[derive(Args, Debug, Clone, Copy, PartialEq)]
pub struct VnavInputs {
    /// Current altitude (feet)
    #[arg(value_parser = finite_f64, allow_negative_numbers = true)]
    pub current_alt_ft: f64,

    /// Target altitude at constraint (feet)
    #[arg(value_parser = finite_f64, allow_negative_numbers = true)]
    pub target_alt_ft: f64,

    /// Distance to constraint (nautical miles)
    #[arg(value_parser = finite_f64, allow_negative_numbers = true)]
    pub distance_nm: f64,

    /// Current groundspeed (knots)
    #[arg(value_parser = finite_f64, allow_negative_numbers = true)]
    pub groundspeed_kts: f64,

    /// Current vertical speed (ft/min)
    #[arg(value_parser = finite_f64, allow_negative_numbers = true, default_value_t = 0.0)]
    pub current_vs_fpm: f64,
}

/// Vertical profile to an altitude constraint
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VnavResult {
    /// Current minus target; positive when a descent is needed
    #[serde(serialize_with = "fixed2")]
    pub altitude_to_lose_ft: f64,
    /// Positive climb, negative descent
    #[serde(serialize_with = "fixed2")]
    pub flight_path_angle_deg: f64,
    #[serde(serialize_with = "fixed2")]
    pub required_vs_fpm: f64,
    /// Distance needed on a 3° path; zero for climbs
    #[serde(serialize_with = "fixed2")]
    pub tod_distance_nm: f64,
    #[serde(serialize_with = "fixed2")]
    pub time_to_constraint_min: f64,
    #[serde(serialize_with = "fixed2")]
    pub distance_per_1000ft: f64,
    pub is_descent: bool,
    pub on_idle_path: bool,
}

/// Reference descent rates and projection at the current vertical speed
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VnavHelpers {
    #[serde(serialize_with = "fixed2")]
    pub vs_for_3deg: f64,
    /// Steeper emergency / high drag path
    #[serde(serialize_with = "fixed2")]
    pub vs_for_5deg: f64,
    /// Distance flown before reaching the target altitude at the current VS
    #[serde(serialize_with = "fixed2")]
    pub distance_at_current_vs_nm: f64,
}

/// Combined record printed by the VNAV tool
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VnavReport {
    #[serde(flatten)]
    pub profile: VnavResult,
    #[serde(flatten)]
    pub helpers: VnavHelpers,
}

/// Calculate VNAV parameters for a constraint `distance_nm` ahead.
///
/// Key formulas:
/// - Flight path angle: γ = atan(Δh / distance)
/// - Required VS: VS_fpm = 101.27 * GS_kts * tan(γ)
/// - TOD for 3°: D_nm = |Δh| / (6076.12 * tan 3°)
///
/// Distance and groundspeed are floored at 0.01 nm and 1 kt before use.
pub fn calculate_vnav(
    current_alt_ft: f64,
    target_alt_ft: f64,
    distance_nm: f64,
    groundspeed_kts: f64,
) -> VnavResult {
    let altitude_change_ft = target_alt_ft - current_alt_ft;
    let is_descent = altitude_change_ft < 0.0;

    let distance_nm = if distance_nm < MIN_DISTANCE_NM {
        debug!(distance_nm, "distance floored");
        MIN_DISTANCE_NM
    } else {
        distance_nm
    };
    let groundspeed_kts = if groundspeed_kts < MIN_GROUNDSPEED_KTS {
        debug!(groundspeed_kts, "groundspeed floored");
        MIN_GROUNDSPEED_KTS
    } else {
        groundspeed_kts
    };

    let gamma_rad = (altitude_change_ft / (distance_nm * NM_TO_FT)).atan();
    let flight_path_angle_deg = gamma_rad.to_degrees();

    let required_vs_fpm = VS_FACTOR_FPM_PER_KT * groundspeed_kts * gamma_rad.tan();

    let tod_distance_nm = if is_descent {
        altitude_change_ft.abs() / (NM_TO_FT * TOD_PATH_DEG.to_radians().tan())
    } else {
        0.0
    };

    let time_to_constraint_min = distance_nm / groundspeed_kts * 60.0;

    let distance_per_1000ft = if altitude_change_ft.abs() > LEVEL_ALTITUDE_FT {
        distance_nm * 1000.0 / altitude_change_ft.abs()
    } else {
        SENTINEL_INFINITE
    };

    let on_idle_path = if is_descent {
        (IDLE_DESCENT_MIN_DEG..=IDLE_DESCENT_MAX_DEG).contains(&flight_path_angle_deg.abs())
    } else {
        (CLIMB_MIN_DEG..=CLIMB_MAX_DEG).contains(&flight_path_angle_deg)
    };

    VnavResult {
        altitude_to_lose_ft: -altitude_change_ft,
        flight_path_angle_deg,
        required_vs_fpm,
        tod_distance_nm,
        time_to_constraint_min,
        distance_per_1000ft,
        is_descent,
        on_idle_path,
    }
}

/// Reference vertical speeds for 3° and 5° descents and the distance flown
/// to achieve `altitude_change_ft` (target minus current) at `current_vs_fpm`.
///
/// Reference speeds are descent-signed whatever the direction of travel.
/// The projection is 999.9 when the aircraft is level, barely moving or
/// climbing/descending away from the target.
pub fn calculate_vnav_helpers(
    groundspeed_kts: f64,
    current_vs_fpm: f64,
    altitude_change_ft: f64,
) -> VnavHelpers {
    let vs_for_angle =
        |angle_deg: f64| -VS_FACTOR_FPM_PER_KT * groundspeed_kts * angle_deg.to_radians().tan();

    let moving = current_vs_fpm.abs() > LEVEL_VS_FPM && groundspeed_kts > MIN_GROUNDSPEED_KTS;
    let distance_at_current_vs_nm = if moving {
        let time_min = altitude_change_ft / current_vs_fpm;
        let distance = time_min * groundspeed_kts / 60.0;
        if distance < 0.0 {
            debug!(
                current_vs_fpm,
                altitude_change_ft,
                "vertical speed away from target"
            );
            SENTINEL_INFINITE
        } else {
            distance
        }
    } else {
        SENTINEL_INFINITE
    };

    VnavHelpers {
        vs_for_3deg: vs_for_angle(TOD_PATH_DEG),
        vs_for_5deg: vs_for_angle(STEEP_PATH_DEG),
        distance_at_current_vs_nm,
    }
}

pub struct VnavCalculator;

impl Calculator for VnavCalculator {
    const NAME: &'static str = "vnav_calculator";
    const ABOUT: &'static str =
        "VNAV profile: path angle, required vertical speed, top of descent and idle path check";
    const EXAMPLE: &'static str = "Example:\n  vnav_calculator 35000 10000 100 450 -1500\n  \
        (Descend from FL350 to 10000 ft, 100 nm away, GS 450 kts, VS -1500 fpm)";

    type Inputs = VnavInputs;
    type Output = VnavReport;

    fn validate(inputs: &VnavInputs) -> Result<(), CalcError> {
        if inputs.distance_nm < 0.0 {
            return Err(CalcError::domain("Distance cannot be negative"));
        }
        if inputs.groundspeed_kts <= 0.0 {
            return Err(CalcError::domain("Groundspeed must be positive"));
        }
        Ok(())
    }

    fn compute(inputs: &VnavInputs) -> VnavReport {
        let profile = calculate_vnav(
            inputs.current_alt_ft,
            inputs.target_alt_ft,
            inputs.distance_nm,
            inputs.groundspeed_kts,
        );
        let helpers = calculate_vnav_helpers(
            inputs.groundspeed_kts,
            inputs.current_vs_fpm,
            inputs.target_alt_ft - inputs.current_alt_ft,
        );
        VnavReport { profile, helpers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_descent_from_fl350() {
        let vnav = calculate_vnav(35000.0, 10000.0, 100.0, 450.0);

        let expected_fpa = (-25000.0_f64 / (100.0 * NM_TO_FT)).atan().to_degrees();
        assert!(vnav.is_descent);
        assert_eq!(vnav.altitude_to_lose_ft, 25000.0);
        assert_relative_eq!(vnav.flight_path_angle_deg, expected_fpa, epsilon = 1e-12);
        assert!(vnav.flight_path_angle_deg < 0.0);
        assert_relative_eq!(
            vnav.tod_distance_nm,
            25000.0 / (NM_TO_FT * 3.0_f64.to_radians().tan()),
            epsilon = 1e-9
        );
        assert_relative_eq!(vnav.tod_distance_nm, 78.5, epsilon = 0.1);
        assert_relative_eq!(
            vnav.time_to_constraint_min,
            100.0 / 450.0 * 60.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(vnav.distance_per_1000ft, 4.0, epsilon = 1e-12);
        // ~2.36° is inside the idle band
        assert!(vnav.on_idle_path);
        assert!(vnav.required_vs_fpm < 0.0);
        assert_relative_eq!(vnav.required_vs_fpm, -1875.0, epsilon = 1.0);
    }

    #[test]
    fn test_climb() {
        let vnav = calculate_vnav(5000.0, 15000.0, 20.0, 250.0);
        assert!(!vnav.is_descent);
        assert_eq!(vnav.altitude_to_lose_ft, -10000.0);
        assert_eq!(vnav.tod_distance_nm, 0.0);
        assert!(vnav.flight_path_angle_deg > 0.0);
        assert!(vnav.required_vs_fpm > 0.0);
        assert!(vnav.on_idle_path);
    }

    /// Profile over 10 nm on a path of `angle_deg`, negative for a descent
    fn profile_at(angle_deg: f64) -> VnavResult {
        let change_ft = angle_deg.to_radians().tan() * 10.0 * NM_TO_FT;
        calculate_vnav(10000.0, 10000.0 + change_ft, 10.0, 300.0)
    }

    #[test]
    fn test_idle_path_bands() {
        // 1° descent is too shallow
        let shallow = profile_at(-1.0);
        assert!(shallow.is_descent);
        assert!(!shallow.on_idle_path);

        // 6° descent is too steep
        let steep = profile_at(-6.0);
        assert!(!steep.on_idle_path);

        // Level is treated as a climb below the band
        let level = calculate_vnav(8000.0, 8000.0, 10.0, 300.0);
        assert!(!level.is_descent);
        assert!(!level.on_idle_path);
        assert_eq!(level.flight_path_angle_deg, 0.0);
        assert_eq!(level.distance_per_1000ft, SENTINEL_INFINITE);
    }

    #[test]
    fn test_descent_band_edges() {
        for angle in [-2.01, -3.99] {
            let vnav = profile_at(angle);
            assert!(vnav.is_descent);
            assert_relative_eq!(vnav.flight_path_angle_deg, angle, epsilon = 1e-9);
            assert!(vnav.on_idle_path, "{angle}° descent should be on the idle path");
        }
    }

    #[test]
    fn test_climb_band() {
        let steep = profile_at(20.0);
        assert!(!steep.is_descent);
        assert!(!steep.on_idle_path);

        let shallow = profile_at(0.3);
        assert!(!shallow.is_descent);
        assert!(!shallow.on_idle_path);

        let near_limit = profile_at(14.9);
        assert_relative_eq!(near_limit.flight_path_angle_deg, 14.9, epsilon = 1e-9);
        assert!(near_limit.on_idle_path);
    }

    #[test]
    fn test_small_change_sentinel() {
        let within = calculate_vnav(10000.0, 9990.0, 10.0, 300.0);
        assert_eq!(within.distance_per_1000ft, SENTINEL_INFINITE);

        let beyond = calculate_vnav(10000.0, 9989.0, 10.0, 300.0);
        assert_relative_eq!(
            beyond.distance_per_1000ft * 11.0,
            10.0 * 1000.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_clamping_floors() {
        let at_fix = calculate_vnav(10000.0, 5000.0, 0.0, 300.0);
        assert_relative_eq!(
            at_fix.time_to_constraint_min,
            0.01 / 300.0 * 60.0,
            epsilon = 1e-15
        );
        assert_relative_eq!(
            at_fix.flight_path_angle_deg,
            (-5000.0_f64 / (0.01 * NM_TO_FT)).atan().to_degrees(),
            epsilon = 1e-12
        );
        // distance per 1000 ft uses the floored distance as well
        assert_relative_eq!(
            at_fix.distance_per_1000ft,
            0.01 * 1000.0 / 5000.0,
            epsilon = 1e-15
        );

        let crawling = calculate_vnav(10000.0, 5000.0, 10.0, 0.5);
        assert_relative_eq!(crawling.time_to_constraint_min, 600.0, epsilon = 1e-12);
    }

    #[test]
    fn test_helper_reference_rates() {
        let helpers = calculate_vnav_helpers(450.0, 0.0, -25000.0);
        assert_relative_eq!(
            helpers.vs_for_3deg,
            -101.27 * 450.0 * 3.0_f64.to_radians().tan(),
            epsilon = 1e-9
        );
        assert_relative_eq!(helpers.vs_for_3deg, -2388.3, epsilon = 0.05);
        assert!(helpers.vs_for_5deg < helpers.vs_for_3deg);

        // Descent-signed even for a climb
        let climbing = calculate_vnav_helpers(450.0, 0.0, 25000.0);
        assert!(climbing.vs_for_3deg < 0.0);
        assert!(climbing.vs_for_5deg < 0.0);
    }

    #[test]
    fn test_helper_projection() {
        let helpers = calculate_vnav_helpers(450.0, -1500.0, -25000.0);
        assert_relative_eq!(
            helpers.distance_at_current_vs_nm,
            25000.0 / 1500.0 * 450.0 / 60.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(helpers.distance_at_current_vs_nm, 125.0, epsilon = 1e-9);

        let projected = |gs: f64, vs: f64, change: f64| {
            calculate_vnav_helpers(gs, vs, change).distance_at_current_vs_nm
        };
        // Climbing while the constraint is below
        assert_eq!(projected(450.0, 1500.0, -25000.0), SENTINEL_INFINITE);
        // Level
        assert_eq!(projected(450.0, 10.0, -25000.0), SENTINEL_INFINITE);
        assert_eq!(projected(450.0, 0.0, -25000.0), SENTINEL_INFINITE);
        // Groundspeed at the floor
        assert_eq!(projected(1.0, -1500.0, -25000.0), SENTINEL_INFINITE);
        // Already at target
        assert_eq!(projected(450.0, -1500.0, 0.0), 0.0);
    }

    #[test]
    fn test_validation() {
        let ok = VnavInputs {
            current_alt_ft: 35000.0,
            target_alt_ft: 10000.0,
            distance_nm: 0.0,
            groundspeed_kts: 450.0,
            current_vs_fpm: 0.0,
        };
        assert!(VnavCalculator::validate(&ok).is_ok());
        let behind = VnavInputs {
            distance_nm: -0.1,
            ..ok
        };
        assert!(matches!(
            VnavCalculator::validate(&behind),
            Err(CalcError::Domain(_))
        ));
        let stopped = VnavInputs {
            groundspeed_kts: 0.0,
            ..ok
        };
        assert!(matches!(
            VnavCalculator::validate(&stopped),
            Err(CalcError::Domain(_))
        ));
    }

    #[test]
    fn test_report_uses_unclamped_groundspeed_for_helpers() {
        let inputs = VnavInputs {
            current_alt_ft: 10000.0,
            target_alt_ft: 9000.0,
            distance_nm: 5.0,
            groundspeed_kts: 0.5,
            current_vs_fpm: -500.0,
        };
        let report = VnavCalculator::compute(&inputs);
        assert_relative_eq!(
            report.profile.time_to_constraint_min,
            300.0,
            epsilon = 1e-12
        );
        assert_eq!(report.helpers.distance_at_current_vs_nm, SENTINEL_INFINITE);
        assert_relative_eq!(
            report.helpers.vs_for_3deg,
            -101.27 * 0.5 * 3.0_f64.to_radians().tan(),
            epsilon = 1e-12
        );
    }
}

use clap::Args;
use serde::Serialize;

use crate::angles::{normalize_degrees, wrap_signed_degrees};
use crate::cli_api::{finite_f64, fixed2, Calculator};
use crate::error::CalcError;

/// Positional inputs of the wind calculator
#[derive(Args, Debug, Clone, Copy, PartialEq)]
pub struct WindInputs {
    /// Ground track (degrees true)
    #[arg(value_parser = finite_f64, allow_negative_numbers = true)]
    pub track: f64,

    /// Aircraft heading (degrees)
    #[arg(value_parser = finite_f64, allow_negative_numbers = true)]
    pub heading: f64,

    /// Wind direction FROM (degrees)
    #[arg(value_parser = finite_f64, allow_negative_numbers = true)]
    pub wind_dir: f64,

    /// Wind speed (knots)
    #[arg(value_parser = finite_f64, allow_negative_numbers = true)]
    pub wind_speed: f64,
}

/// Wind components relative to the ground track
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindResult {
    /// Positive = headwind, negative = tailwind (knots)
    #[serde(serialize_with = "fixed2")]
    pub headwind: f64,
    /// Positive = from the right, negative = from the left (knots)
    #[serde(serialize_with = "fixed2")]
    pub crosswind: f64,
    #[serde(serialize_with = "fixed2")]
    pub total_wind: f64,
    /// Wind correction angle. Always 0.0: it needs TAS, which is not an input.
    #[serde(serialize_with = "fixed2")]
    pub wca: f64,
    /// Track minus heading, in (-180, 180]
    #[serde(serialize_with = "fixed2")]
    pub drift: f64,
}

/// Split a wind into along-track and across-track components.
///
/// Directions are degrees in any range; `wind_dir` is where the wind comes FROM.
/// A wind from directly ahead (relative 180°) is the largest headwind, a
/// wind from 90° right of track is a positive crosswind.
pub fn calculate_wind(track: f64, heading: f64, wind_dir: f64, wind_speed: f64) -> WindResult {
    let track = normalize_degrees(track);
    let heading = normalize_degrees(heading);
    let wind_dir = normalize_degrees(wind_dir);

    let drift = wrap_signed_degrees(track - heading);

    let wind_from_rad = wrap_signed_degrees(wind_dir - track).to_radians();

    WindResult {
        headwind: -wind_speed * wind_from_rad.cos(),
        crosswind: wind_speed * wind_from_rad.sin(),
        total_wind: wind_speed,
        wca: 0.0,
        drift,
    }
}

pub struct WindCalculator;

impl Calculator for WindCalculator {
    const NAME: &'static str = "wind_calculator";
    const ABOUT: &'static str =
        "Headwind, crosswind and drift from track, heading and reported wind";
    const EXAMPLE: &'static str = concat!(
        "Example:\n",
        "  wind_calculator 90 85 270 15\n",
        "  (Track 90°, Heading 85°, Wind from 270° at 15 knots)"
    );

    type Inputs = WindInputs;
    type Output = WindResult;

    fn validate(inputs: &WindInputs) -> Result<(), CalcError> {
        if inputs.wind_speed < 0.0 {
            return Err(CalcError::domain("Wind speed cannot be negative"));
        }
        Ok(())
    }

    fn compute(inputs: &WindInputs) -> WindResult {
        calculate_wind(inputs.track, inputs.heading, inputs.wind_dir, inputs.wind_speed)
    }
}

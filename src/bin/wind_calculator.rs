//! Usage: wind_calculator <track> <heading> <wind_dir> <wind_speed>

use mfd_calculators::{run, WindCalculator};
use std::process::ExitCode;

fn main() -> ExitCode {
    run::<WindCalculator>()
}

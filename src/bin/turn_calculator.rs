//! Usage: turn_calculator <tas_kts> <bank_deg> <course_change_deg>

use mfd_calculators::{run, TurnCalculator};
use std::process::ExitCode;

fn main() -> ExitCode {
    run::<TurnCalculator>()
}

//! Usage: vnav_calculator <current_alt_ft> <target_alt_ft> <distance_nm> <groundspeed_kts>
//!        [current_vs_fpm]

use mfd_calculators::{run, VnavCalculator};
use std::process::ExitCode;

fn main() -> ExitCode {
    run::<VnavCalculator>()
}

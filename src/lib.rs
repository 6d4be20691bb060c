//! # MFD Calculators
//!
//! Closed-form flight calculators for a multi-function display: level turn
//! performance, vertical navigation to an altitude constraint, and wind
//! components along the ground track. Each one is also a small binary that
//! prints its result as JSON.

// Re-export the main types and functions
pub use cli_api::{run, run_with, Calculator, OutputFormat};
pub use error::CalcError;
pub use turn::{calculate_turn_performance, TurnCalculator, TurnInputs, TurnResult};
pub use vnav::{
    calculate_vnav, calculate_vnav_helpers, VnavCalculator, VnavHelpers, VnavInputs, VnavReport,
    VnavResult,
};
pub use wind::{calculate_wind, WindCalculator, WindInputs, WindResult};

// Module declarations
pub mod angles;
pub mod cli_api;
pub mod constants;
mod error;
pub mod turn;
pub mod vnav;
pub mod wind;

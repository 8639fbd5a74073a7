//! Scenario and engine configuration.
//!
//! [`LaunchConfig`] is the analyst-facing blueprint of a scenario.  The
//! engine-level structs ([`LiquidityConfig`], [`SolverConfig`]) are derived
//! from it and consumed through [`FromConfig`](crate::traits::FromConfig).

mod launch;
mod liquidity;
mod solver;

pub use launch::{
    LaunchConfig, DEFAULT_EXPECTED_DEMAND, DEFAULT_LAUNCH_FDV, DEFAULT_MAX_TOTAL_SUPPLY,
    DEFAULT_TGE_LIQUIDITY_PCT,
};
pub use liquidity::LiquidityConfig;
pub use solver::{SolverConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};

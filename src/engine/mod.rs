//! Constant-product engines.
//!
//! | Engine | Role |
//! |--------|------|
//! | [`ReservePair::from_config`](crate::domain::ReservePair) | Seeds the launch pool from a [`LiquidityConfig`](crate::config::LiquidityConfig) |
//! | [`LiquidityPoolSimulator`] | Month-by-month sell/demand simulation |
//! | [`PriceImpactCalculator`] | One-shot slippage and the TGE impact curve |
//! | [`DemandSolver`] | Market-cap and reserve targets |

mod demand_solver;
mod liquidity;
mod price_impact;
mod simulator;

#[cfg(test)]
#[allow(clippy::panic, clippy::cast_precision_loss)]
mod proptest_properties;

pub use demand_solver::{DemandEstimate, DemandSolver, MarketCapTarget};
pub use liquidity::additional_quote_needed;
pub use price_impact::{
    ImpactCurve, ImpactPoint, PriceImpactCalculator, BUY_SIDE_MAX_PCT, DEFAULT_CURVE_STEPS,
};
pub use simulator::{LiquidityPoolSimulator, SimulationRun, SimulationStepResult};

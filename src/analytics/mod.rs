//! Derived series over an emissions schedule.
//!
//! - [`SupplyShockCalculator`]: cumulative supply and month-over-month
//!   dilution.
//! - [`InflationCalculator`]: the cumulative-supply factor the simulator
//!   applies to price and demand.
//! - [`UnlockSummary`]: unlock volumes and USD values around a month.
//! - [`PriceChangeSeries`]: volatility of a simulated price path.

mod inflation;
mod price_change;
mod supply_shock;
mod unlock_summary;

pub use inflation::{InflationCalculator, InflationPoint, InflationSeries, NEUTRAL_FACTOR};
pub use price_change::{mean, PriceChangeSeries};
pub use supply_shock::{SupplyShockCalculator, SupplyShockRecord, SupplyShockSeries};
pub use unlock_summary::{MonthUnlock, UnlockSummary};

//! Initial launch reserves.
//!
//! ```text
//! x_initial = max_total_supply × liquidity_fraction × tge_liquidity_pct / 100
//! y_initial = x_initial × starting_price
//! k         = x_initial × y_initial
//! ```

use crate::config::LiquidityConfig;
use crate::domain::ReservePair;
use crate::error::Result;
use crate::math::CheckedFloat;
use crate::traits::FromConfig;

impl FromConfig<LiquidityConfig> for ReservePair {
    /// Seeds the pool with the TGE share of the liquidity allocation.
    ///
    /// # Errors
    ///
    /// - Propagates any error from [`LiquidityConfig::validate`].
    /// - Returns [`SimError::ZeroReserve`](crate::error::SimError::ZeroReserve) if a derived reserve underflows
    ///   to zero.
    fn from_config(config: &LiquidityConfig) -> Result<Self> {
        config.validate()?;

        let x = config
            .max_total_supply()
            .safe_mul(config.liquidity_fraction())?
            .safe_mul(config.tge_liquidity_pct().as_fraction())?;
        let y = x.safe_mul(config.starting_price().get())?;
        Self::new(x, y)
    }
}

/// USD that must be added after the month-0 sell to bring `y` back to its
/// initial level: `y_initial - k / (x_initial + month0_tokens_sold)`.
///
/// # Errors
///
/// Returns [`SimError::DivisionByZero`](crate::error::SimError::DivisionByZero) or [`SimError::NonFinite`](crate::error::SimError::NonFinite) for
/// degenerate inputs.
pub fn additional_quote_needed(
    initial: &ReservePair,
    month0_tokens_sold: f64,
) -> Result<f64> {
    let x_after = initial.x().safe_add(month0_tokens_sold)?;
    let y_after = initial.k().safe_div(x_after)?;
    initial.y().safe_sub(y_after)
}

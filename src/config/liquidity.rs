//! Configuration for the launch liquidity pool.

use crate::domain::{Percentage, Price};
use crate::error::{Result, SimError};

/// Parameters that determine the initial constant-product reserves.
///
/// # Derived Values
///
/// - `x_initial = max_total_supply × liquidity_fraction × tge_liquidity_pct / 100`
/// - `y_initial = x_initial × starting_price`
/// - `k = x_initial × y_initial`
///
/// # Validation
///
/// - `max_total_supply` must be positive and finite.
/// - `starting_price` must be positive.
/// - `liquidity_fraction` must lie in `(0, 1]`.
/// - `tge_liquidity_pct` must be non-zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiquidityConfig {
    max_total_supply: f64,
    starting_price: Price,
    liquidity_fraction: f64,
    tge_liquidity_pct: Percentage,
}

impl LiquidityConfig {
    /// Creates a new `LiquidityConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] if any parameter is out of
    /// range.
    pub fn new(
        max_total_supply: f64,
        starting_price: Price,
        liquidity_fraction: f64,
        tge_liquidity_pct: Percentage,
    ) -> Result<Self> {
        let config = Self {
            max_total_supply,
            starting_price,
            liquidity_fraction,
            tge_liquidity_pct,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] if any parameter is out of
    /// range.
    pub fn validate(&self) -> Result<()> {
        if !self.max_total_supply.is_finite() || self.max_total_supply <= 0.0 {
            return Err(SimError::InvalidConfiguration(
                "max total supply must be positive",
            ));
        }
        if self.starting_price.get() <= 0.0 {
            return Err(SimError::InvalidConfiguration(
                "starting price must be positive",
            ));
        }
        if !(self.liquidity_fraction > 0.0 && self.liquidity_fraction <= 1.0) {
            return Err(SimError::InvalidConfiguration(
                "liquidity fraction must lie within (0, 1]",
            ));
        }
        if self.tge_liquidity_pct.get() == 0.0 {
            return Err(SimError::InvalidConfiguration(
                "TGE liquidity percentage must be non-zero",
            ));
        }
        Ok(())
    }

    /// Returns the maximum total token supply.
    #[must_use]
    pub const fn max_total_supply(&self) -> f64 {
        self.max_total_supply
    }

    /// Returns the launch price.
    #[must_use]
    pub const fn starting_price(&self) -> Price {
        self.starting_price
    }

    /// Returns the liquidity pool's share of the max supply.
    #[must_use]
    pub const fn liquidity_fraction(&self) -> f64 {
        self.liquidity_fraction
    }

    /// Returns the share of the liquidity allocation deployed at TGE.
    #[must_use]
    pub const fn tge_liquidity_pct(&self) -> Percentage {
        self.tge_liquidity_pct
    }
}

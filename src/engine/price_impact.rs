//! One-shot price impact on a constant-product pool.
//!
//! # Formulas
//!
//! | Action | New token reserve |
//! |--------|-------------------|
//! | `sold` | `x_new = x + change` (tokens) |
//! | `bought` | `x_new = max(x - x × change / 100, 0)` (percent of `x`) |
//!
//! In both cases `y_new = k / x_new` and the new price is `y_new / x_new`.

use serde::{Deserialize, Serialize};

use crate::domain::{Price, ReservePair, TradeAction};
use crate::error::{Result, SimError};
use crate::math::CheckedFloat;

/// Share of `x` the buy side of an impact curve reaches, in percent.
pub const BUY_SIDE_MAX_PCT: f64 = 50.0;

/// Default number of steps on each side of an impact curve.
pub const DEFAULT_CURVE_STEPS: u32 = 6;

/// Price-impact calculator.
///
/// # Examples
///
/// ```
/// use unlock_impact::domain::{ReservePair, TradeAction};
/// use unlock_impact::engine::PriceImpactCalculator;
///
/// let pool = ReservePair::new(40_000_000.0, 3_600_000.0).expect("reserves");
/// let price = PriceImpactCalculator::impact(&pool, 4_000_000.0, TradeAction::Sold)
///     .expect("impact");
/// assert!((price.get() - 0.074_380_165).abs() < 1e-8);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceImpactCalculator;

impl PriceImpactCalculator {
    /// Price after a single trade against `pool`.
    ///
    /// # Errors
    ///
    /// - [`SimError::InsufficientLiquidity`] if the token reserve would
    ///   reach zero (or go negative).
    /// - [`SimError::NonFinite`] for non-finite intermediates.
    pub fn impact(pool: &ReservePair, change: f64, action: TradeAction) -> Result<Price> {
        let x = pool.x();
        let x_new = match action {
            TradeAction::Sold => x.safe_add(change)?,
            TradeAction::Bought => {
                let token_change = x.safe_mul(change)?.safe_div(100.0)?;
                x.safe_sub(token_change)?.max(0.0)
            }
        };
        if x_new <= 0.0 {
            return Err(SimError::InsufficientLiquidity);
        }
        let y_new = pool.k().safe_div(x_new)?;
        Price::new(y_new.safe_div(x_new)?)
    }

    /// [`impact`](Self::impact) with the action given as `"sold"` or
    /// `"bought"`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidAction`] for any other string, otherwise
    /// as [`impact`](Self::impact).
    pub fn impact_str(pool: &ReservePair, change: f64, action: &str) -> Result<Price> {
        Self::impact(pool, change, action.parse()?)
    }

    /// Builds the TGE impact curve.
    ///
    /// The sell side steps through `tge_tokens × i / steps` for
    /// `i in 1..=steps`, recorded as negative token counts; the buy side
    /// steps through `50 % × i / steps` of `x`, recorded as positive token
    /// counts.  A single anchor at `0` carries the pool's spot price.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] if `steps` is zero and
    /// propagates any [`impact`](Self::impact) failure.
    pub fn curve(pool: &ReservePair, tge_tokens: f64, steps: u32) -> Result<ImpactCurve> {
        if steps == 0 {
            return Err(SimError::InvalidConfiguration(
                "impact curve needs at least one step",
            ));
        }
        let n = f64::from(steps);
        let mut points = Vec::with_capacity(2 * steps as usize + 1);

        for i in (1..=steps).rev() {
            let sold = tge_tokens * f64::from(i) / n;
            let price = Self::impact(pool, sold, TradeAction::Sold)?;
            points.push(ImpactPoint {
                tokens: -sold,
                price: price.get(),
            });
        }
        points.push(ImpactPoint {
            tokens: 0.0,
            price: pool.price()?.get(),
        });
        for i in 1..=steps {
            let pct = BUY_SIDE_MAX_PCT * f64::from(i) / n;
            let price = Self::impact(pool, pct, TradeAction::Bought)?;
            points.push(ImpactPoint {
                tokens: pool.x() * pct / 100.0,
                price: price.get(),
            });
        }

        let sold_pct = if tge_tokens > 0.0 { 100.0 } else { 0.0 };
        Ok(ImpactCurve {
            points,
            sold_pct,
            bought_pct: BUY_SIDE_MAX_PCT,
        })
    }
}

/// One point of an [`ImpactCurve`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactPoint {
    /// Tokens traded: negative when sold into the pool, positive when bought.
    pub tokens: f64,
    /// Price after the trade.
    pub price: f64,
}

/// Price against traded volume, sorted by `tokens`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactCurve {
    points: Vec<ImpactPoint>,
    sold_pct: f64,
    bought_pct: f64,
}

impl ImpactCurve {
    /// Points in ascending token order.
    #[must_use]
    pub fn points(&self) -> &[ImpactPoint] {
        &self.points
    }

    /// Deepest sell on the curve as a percentage of the TGE token volume;
    /// `0` when that volume is zero.
    #[must_use]
    pub const fn sold_pct(&self) -> f64 {
        self.sold_pct
    }

    /// Deepest buy on the curve as a percentage of `x`.
    #[must_use]
    pub const fn bought_pct(&self) -> f64 {
        self.bought_pct
    }

    /// Lowest price on the curve.
    #[must_use]
    pub fn min_price(&self) -> Option<f64> {
        self.points.iter().map(|p| p.price).reduce(f64::min)
    }

    /// Highest price on the curve.
    #[must_use]
    pub fn max_price(&self) -> Option<f64> {
        self.points.iter().map(|p| p.price).reduce(f64::max)
    }
}

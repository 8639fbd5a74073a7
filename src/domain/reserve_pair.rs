//! Constant-product reserve state.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::Price;
use crate::error::{Result, SimError};
use crate::math::CheckedFloat;

/// Reserves of a constant-product pool: `x` tokens against `y` USD.
///
/// The product `k = x · y` is fixed for the lifetime of one simulation run;
/// every mutation in this crate recomputes one side from `k` and the other.
///
/// # Invariants
///
/// - `x > 0` and `y > 0`, both finite.
/// - `k` never changes after construction.
///
/// # Examples
///
/// ```
/// use unlock_impact::domain::ReservePair;
///
/// let pool = ReservePair::new(40_000_000.0, 3_600_000.0).expect("positive reserves");
/// assert!((pool.k() - 1.44e14).abs() < 1.0);
/// assert!((pool.price().expect("price").get() - 0.09).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawReserves")]
pub struct ReservePair {
    x: f64,
    y: f64,
    k: f64,
}

/// Wire form: only `x` and `y` are read, `k` is always recomputed.
#[derive(Deserialize)]
struct RawReserves {
    x: f64,
    y: f64,
}

impl TryFrom<RawReserves> for ReservePair {
    type Error = SimError;

    fn try_from(raw: RawReserves) -> Result<Self, Self::Error> {
        Self::new(raw.x, raw.y)
    }
}

impl ReservePair {
    /// Creates a reserve pair and fixes its invariant `k = x · y`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ZeroReserve`] if either reserve is not strictly
    /// positive and finite, or [`SimError::NonFinite`] if `k` overflows.
    pub fn new(x: f64, y: f64) -> Result<Self> {
        check_reserve(x)?;
        check_reserve(y)?;
        let k = x.safe_mul(y)?;
        Ok(Self { x, y, k })
    }

    /// Returns the token reserve.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Returns the USD reserve.
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Returns the constant product.
    #[must_use]
    pub const fn k(&self) -> f64 {
        self.k
    }

    /// Spot price `y / x`.
    ///
    /// # Errors
    ///
    /// Propagates [`Price::from_reserves`] failures.
    pub fn price(&self) -> Result<Price> {
        Price::from_reserves(self.y, self.x)
    }

    /// Adds `tokens` to the token side and recomputes `y = k / x`.
    ///
    /// Returns the USD drained from the pool, `y_old - y_new`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ZeroReserve`] if the resulting reserves are not
    /// strictly positive.
    pub fn sell_tokens(&mut self, tokens: f64) -> Result<f64> {
        let x_new = self.x.safe_add(tokens)?;
        check_reserve(x_new)?;
        let y_new = self.k.safe_div(x_new)?;
        check_reserve(y_new)?;
        let extracted = self.y - y_new;
        self.x = x_new;
        self.y = y_new;
        Ok(extracted)
    }

    /// Adds `usd` to the quote side and recomputes `x = k / y`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ZeroReserve`] if the resulting reserves are not
    /// strictly positive.
    pub fn inject_quote(&mut self, usd: f64) -> Result<()> {
        let y_new = self.y.safe_add(usd)?;
        check_reserve(y_new)?;
        let x_new = self.k.safe_div(y_new)?;
        check_reserve(x_new)?;
        self.x = x_new;
        self.y = y_new;
        Ok(())
    }
}

impl fmt::Display for ReservePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x={} y={} k={}", self.x, self.y, self.k)
    }
}

fn check_reserve(value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::ZeroReserve)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::math::approx_eq_rel;

    fn launch_pool() -> ReservePair {
        let Ok(pool) = ReservePair::new(40_000_000.0, 3_600_000.0) else {
            panic!("valid reserves");
        };
        pool
    }

    #[test]
    fn new_rejects_non_positive() {
        assert!(ReservePair::new(0.0, 1.0).is_err());
        assert!(ReservePair::new(1.0, -1.0).is_err());
        assert!(ReservePair::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn k_is_product() {
        let pool = launch_pool();
        assert!(approx_eq_rel(pool.k(), 1.44e14, 1e-12));
    }

    #[test]
    fn sell_tokens_extracts_quote() {
        let mut pool = launch_pool();
        let Ok(extracted) = pool.sell_tokens(4_000_000.0) else {
            panic!("expected Ok");
        };
        assert!((pool.x() - 44_000_000.0).abs() < 1e-6);
        assert!((pool.y() - 3_272_727.272_727).abs() < 1e-3);
        assert!((extracted - 327_272.727_272).abs() < 1e-3);
        assert!(approx_eq_rel(pool.x() * pool.y(), pool.k(), 1e-12));
    }

    #[test]
    fn sell_zero_tokens_is_noop() {
        let mut pool = launch_pool();
        let Ok(extracted) = pool.sell_tokens(0.0) else {
            panic!("expected Ok");
        };
        assert!(extracted.abs() < 1e-9);
        assert_eq!(pool, launch_pool());
    }

    #[test]
    fn inject_quote_preserves_k() {
        let mut pool = launch_pool();
        assert!(pool.inject_quote(100_000.0).is_ok());
        assert!((pool.y() - 3_700_000.0).abs() < 1e-6);
        assert!(approx_eq_rel(pool.x() * pool.y(), pool.k(), 1e-12));
    }

    #[cfg(feature = "json")]
    #[test]
    fn deserialize_rejects_invalid_reserves() {
        assert!(serde_json::from_str::<ReservePair>(r#"{"x":-10,"y":5,"k":999}"#).is_err());
        assert!(serde_json::from_str::<ReservePair>(r#"{"x":10,"y":0}"#).is_err());
    }

    #[cfg(feature = "json")]
    #[test]
    fn deserialize_recomputes_k() {
        let Ok(pool) = serde_json::from_str::<ReservePair>(r#"{"x":4.0,"y":9.0,"k":999.0}"#)
        else {
            panic!("expected reserves");
        };
        assert!((pool.k() - 36.0).abs() < f64::EPSILON);

        let Ok(json) = serde_json::to_string(&launch_pool()) else {
            panic!("serializable");
        };
        let Ok(back) = serde_json::from_str::<ReservePair>(&json) else {
            panic!("expected reserves");
        };
        assert!(approx_eq_rel(back.k(), launch_pool().k(), 1e-12));
    }

    #[test]
    fn inject_negative_below_zero_rejected() {
        let mut pool = launch_pool();
        assert!(matches!(
            pool.inject_quote(-4_000_000.0),
            Err(SimError::ZeroReserve)
        ));
        assert_eq!(pool, launch_pool());
    }
}

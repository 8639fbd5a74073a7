//! Token price in quote currency (USD per token).

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// USD price of one token.
///
/// Wraps an `f64` that must be finite and non-negative.
///
/// # Examples
///
/// ```
/// use unlock_impact::domain::Price;
///
/// let p = Price::from_reserves(3_600_000.0, 40_000_000.0).expect("valid reserves");
/// assert!((p.get() - 0.09).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(f64);

impl Price {
    /// Price of zero.
    pub const ZERO: Self = Self(0.0);

    /// Creates a new `Price`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NonFinite`] if the value is negative, `NaN` or
    /// infinite.
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(SimError::NonFinite("price must be finite and non-negative"));
        }
        Ok(Self(value))
    }

    /// Spot price of a constant-product pool: `quote_reserve / token_reserve`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::DivisionByZero`] if `token_reserve` is zero and
    /// [`SimError::NonFinite`] if the ratio is not a valid price.
    pub fn from_reserves(quote_reserve: f64, token_reserve: f64) -> Result<Self> {
        if token_reserve == 0.0 {
            return Err(SimError::DivisionByZero);
        }
        Self::new(quote_reserve / token_reserve)
    }

    /// Launch price implied by a fully diluted valuation:
    /// `fdv / max_total_supply`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::DivisionByZero`] for a zero supply.
    pub fn from_fdv(fdv: f64, max_total_supply: f64) -> Result<Self> {
        if max_total_supply == 0.0 {
            return Err(SimError::DivisionByZero);
        }
        Self::new(fdv / max_total_supply)
    }

    /// Returns the underlying `f64` value.
    #[must_use]
    pub const fn get(&self) -> f64 {
        self.0
    }

    /// USD value of `tokens` at this price.
    #[must_use]
    pub fn value_of(&self, tokens: f64) -> f64 {
        self.0 * tokens
    }
}

impl TryFrom<f64> for Price {
    type Error = SimError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for f64 {
    fn from(value: Price) -> Self {
        value.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn new_valid() {
        let Ok(p) = Price::new(0.09) else {
            panic!("expected Ok");
        };
        assert!((p.get() - 0.09).abs() < f64::EPSILON);
    }

    #[test]
    fn new_rejects_invalid() {
        assert!(Price::new(-1.0).is_err());
        assert!(Price::new(f64::NAN).is_err());
        assert!(Price::new(f64::INFINITY).is_err());
    }

    #[test]
    fn from_reserves_zero_token_reserve() {
        assert!(matches!(
            Price::from_reserves(1.0, 0.0),
            Err(SimError::DivisionByZero)
        ));
    }

    #[test]
    fn from_fdv_launch_price() {
        let Ok(p) = Price::from_fdv(90_000_000.0, 1_000_000_000.0) else {
            panic!("expected Ok");
        };
        assert!((p.get() - 0.09).abs() < 1e-12);
    }

    #[test]
    fn value_of_tokens() {
        let Ok(p) = Price::new(0.5) else {
            panic!("expected Ok");
        };
        assert!((p.value_of(1_000.0) - 500.0).abs() < f64::EPSILON);
    }

    #[cfg(feature = "json")]
    #[test]
    fn deserialize_validates() {
        assert!(serde_json::from_str::<Price>("-3.0").is_err());
        let Ok(p) = serde_json::from_str::<Price>("0.09") else {
            panic!("expected price");
        };
        assert!((p.get() - 0.09).abs() < f64::EPSILON);
    }

    #[test]
    fn ordering() {
        assert!(Price::ZERO < Price(1.0));
    }
}

//! Percentage in the closed range `0..=100`.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Value that represents 100%.
const HUNDRED: f64 = 100.0;

/// A percentage in `[0, 100]`, e.g. a selling-pressure assumption or the
/// share of the liquidity allocation deployed at TGE.
///
/// # Examples
///
/// ```
/// use unlock_impact::domain::Percentage;
///
/// let sp = Percentage::new(25.0).expect("in range");
/// assert!((sp.as_fraction() - 0.25).abs() < f64::EPSILON);
/// assert!((sp.apply(1_000.0) - 250.0).abs() < f64::EPSILON);
/// assert!(Percentage::new(101.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Percentage(f64);

impl Percentage {
    /// 0%.
    pub const ZERO: Self = Self(0.0);

    /// 100%.
    pub const HUNDRED: Self = Self(HUNDRED);

    /// Creates a new `Percentage`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidPercentage`] if `value` is not finite or
    /// lies outside `[0, 100]`.
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(SimError::InvalidPercentage("percentage must be finite"));
        }
        if !(0.0..=HUNDRED).contains(&value) {
            return Err(SimError::InvalidPercentage(
                "percentage must lie within 0..=100",
            ));
        }
        Ok(Self(value))
    }

    /// Returns the raw percentage value (`25.0` for 25%).
    #[must_use]
    pub const fn get(&self) -> f64 {
        self.0
    }

    /// Returns the percentage as a fraction (`0.25` for 25%).
    #[must_use]
    pub fn as_fraction(&self) -> f64 {
        self.0 / HUNDRED
    }

    /// Scales `amount` by this percentage.
    #[must_use]
    pub fn apply(&self, amount: f64) -> f64 {
        amount * self.as_fraction()
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::HUNDRED
    }
}

impl TryFrom<f64> for Percentage {
    type Error = SimError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Percentage> for f64 {
    fn from(value: Percentage) -> Self {
        value.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn new_in_range() {
        let Ok(p) = Percentage::new(20.0) else {
            panic!("expected Ok");
        };
        assert!((p.get() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn bounds_inclusive() {
        assert!(Percentage::new(0.0).is_ok());
        assert!(Percentage::new(100.0).is_ok());
    }

    #[test]
    fn out_of_range_rejected() {
        assert!(Percentage::new(-0.1).is_err());
        assert!(Percentage::new(100.1).is_err());
        assert!(Percentage::new(f64::NAN).is_err());
    }

    #[test]
    fn default_is_full_pressure() {
        assert_eq!(Percentage::default(), Percentage::HUNDRED);
    }

    #[test]
    fn apply_scales() {
        let Ok(p) = Percentage::new(50.0) else {
            panic!("expected Ok");
        };
        assert!((p.apply(3_000.0) - 1_500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Percentage::HUNDRED), "100%");
    }
}

//! Finite-checked `f64` arithmetic for reserve calculations.
//!
//! Every reserve, price and demand value in the crate is an IEEE 754 `f64`.
//! The [`CheckedFloat`] trait wraps the handful of operations the engines
//! need so that a non-finite intermediate surfaces as a [`SimError`]
//! instead of silently propagating `NaN` through a price path.
//!
//! # Examples
//!
//! ```
//! use unlock_impact::math::CheckedFloat;
//!
//! let k = 40_000_000.0_f64 * 3_600_000.0;
//! let y = k.safe_div(44_000_000.0);
//! assert!(y.is_ok());
//! assert!(1.0_f64.safe_div(0.0).is_err());
//! ```

use crate::error::{Result, SimError};

/// Fallible arithmetic on `f64` values.
///
/// # Contract
///
/// - **No panics**: all error conditions produce `Err`.
/// - A result is `Ok` only if it is finite.
/// - Division by an exact zero is [`SimError::DivisionByZero`]; any other
///   non-finite outcome is [`SimError::NonFinite`].
pub trait CheckedFloat: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NonFinite`] if the sum is not finite.
    fn safe_add(self, other: Self) -> Result<Self>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NonFinite`] if the difference is not finite.
    fn safe_sub(self, other: Self) -> Result<Self>;

    /// Checked multiplication.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NonFinite`] if the product is not finite.
    fn safe_mul(self, other: Self) -> Result<Self>;

    /// Checked division.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::DivisionByZero`] if `other` is zero and
    /// [`SimError::NonFinite`] if the quotient is not finite.
    fn safe_div(self, other: Self) -> Result<Self>;

    /// Checked square root.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NonFinite`] for negative or non-finite inputs.
    fn safe_sqrt(self) -> Result<Self>;
}

impl CheckedFloat for f64 {
    fn safe_add(self, other: Self) -> Result<Self> {
        finite(self + other, "float addition overflow")
    }

    fn safe_sub(self, other: Self) -> Result<Self> {
        finite(self - other, "float subtraction overflow")
    }

    fn safe_mul(self, other: Self) -> Result<Self> {
        finite(self * other, "float multiplication overflow")
    }

    fn safe_div(self, other: Self) -> Result<Self> {
        if other == 0.0 {
            return Err(SimError::DivisionByZero);
        }
        finite(self / other, "float division overflow")
    }

    fn safe_sqrt(self) -> Result<Self> {
        if self < 0.0 {
            return Err(SimError::NonFinite("square root of a negative value"));
        }
        finite(self.sqrt(), "square root of a non-finite value")
    }
}

/// Returns `value` if it is finite, otherwise [`SimError::NonFinite`].
///
/// # Errors
///
/// Returns [`SimError::NonFinite`] carrying `context` for `NaN` or `±∞`.
#[inline]
pub fn finite(value: f64, context: &'static str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SimError::NonFinite(context))
    }
}

/// `true` if `a` and `b` agree within `rel` relative tolerance.
///
/// Used by invariant checks where `k` is in the 1e14 range and an absolute
/// epsilon is meaningless.
#[must_use]
pub fn approx_eq_rel(a: f64, b: f64, rel: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(f64::MIN_POSITIVE);
    (a - b).abs() / scale <= rel
}

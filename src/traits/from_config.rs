//! Generic construction trait for building engine state from configuration.
//!
//! [`FromConfig`] gives every configurable engine piece a uniform,
//! validating constructor:
//!
//! ```text
//! LiquidityConfig => ReservePair::from_config(&cfg)   (initial pool)
//! SolverConfig    => DemandSolver::from_config(&cfg)  (inverse problems)
//! ```
//!
//! # Validation Contract
//!
//! Implementations **must** call the config's `validate()` before using
//! it.  A successfully constructed value is guaranteed to be in a valid
//! initial state.
//!
//! There is no blanket implementation; each pairing is explicit.

use crate::error::Result;

/// Builds `Self` from a configuration of type `C`.
///
/// # Errors
///
/// Returns [`SimError::InvalidConfiguration`](crate::error::SimError::InvalidConfiguration) (or a more specific variant)
/// if the configuration is invalid.
pub trait FromConfig<C> {
    /// Creates a new instance from the given configuration.
    ///
    /// # Errors
    ///
    /// - [`SimError::InvalidConfiguration`](crate::error::SimError::InvalidConfiguration) if a parameter is out of range.
    /// - [`SimError::ZeroReserve`](crate::error::SimError::ZeroReserve) if derived reserves are not positive.
    fn from_config(config: &C) -> Result<Self>
    where
        Self: Sized;
}

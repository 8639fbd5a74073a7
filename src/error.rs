//! Unified error types for the emission simulation library.
//!
//! All fallible operations across the crate return [`SimError`] as their
//! error type.  Soft conditions are deliberately *not* errors:
//!
//! - a month outside the schedule yields `None` from
//!   [`MonthSeries::value_at`](crate::traits::MonthSeries::value_at);
//! - a demand search that exhausts its iteration budget returns its closest
//!   guess with [`DemandEstimate::converged`](crate::engine::DemandEstimate::converged)
//!   set to `false`;
//! - non-numeric table cells are coerced to zero at ingestion.

use thiserror::Error;

/// Errors produced by schedule ingestion, the liquidity engine and the
/// scenario runner.
#[derive(Debug, Error)]
pub enum SimError {
    /// A required row or column is missing from an input table.
    #[error("data integrity error: {0}")]
    DataIntegrity(String),

    /// A price-impact trade action other than `sold` or `bought`.
    #[error("invalid action `{0}`: must be `sold` or `bought`")]
    InvalidAction(String),

    /// A trade would drain the token reserve to zero.
    #[error("insufficient liquidity for this transaction")]
    InsufficientLiquidity,

    /// A reserve is zero, negative or not finite.
    #[error("pool reserve must be positive and finite")]
    ZeroReserve,

    /// Division by zero in a pool calculation.
    #[error("division by zero")]
    DivisionByZero,

    /// An intermediate result is `NaN` or infinite.
    #[error("non-finite result: {0}")]
    NonFinite(&'static str),

    /// A percentage outside `[0, 100]` or not finite.
    #[error("invalid percentage: {0}")]
    InvalidPercentage(&'static str),

    /// A configuration parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// Reading an input table from disk failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// An input table or configuration is not valid JSON.
    #[cfg(feature = "json")]
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Crate-wide result type; the error defaults to [`SimError`].
pub type Result<T, E = SimError> = core::result::Result<T, E>;

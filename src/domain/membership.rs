//! Pool membership flags and the classification derived from them.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::PressureSource;
use crate::error::{Result, SimError};

/// Name of the membership row that carries the liquidity allocation.
pub const LIQUIDITY_POOL: &str = "Liquidity";

/// Flags for one named emission pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembershipRow {
    pool_name: String,
    circulation: bool,
    is_investor: bool,
    allocation: Option<f64>,
}

impl MembershipRow {
    /// Creates a row without an allocation.
    #[must_use]
    pub fn new(pool_name: impl Into<String>, circulation: bool, is_investor: bool) -> Self {
        Self {
            pool_name: pool_name.into(),
            circulation,
            is_investor,
            allocation: None,
        }
    }

    /// Sets the pool's share of the maximum total supply, as a fraction.
    #[must_use]
    pub fn with_allocation(mut self, fraction: f64) -> Self {
        self.allocation = Some(fraction);
        self
    }

    /// Returns the pool name.
    #[must_use]
    pub fn pool_name(&self) -> &str {
        &self.pool_name
    }

    /// `true` if the pool counts toward circulating supply.
    #[must_use]
    pub const fn circulation(&self) -> bool {
        self.circulation
    }

    /// `true` if the pool belongs to investors.
    #[must_use]
    pub const fn is_investor(&self) -> bool {
        self.is_investor
    }

    /// The pool's allocation as a fraction of max supply, if present.
    #[must_use]
    pub const fn allocation(&self) -> Option<f64> {
        self.allocation
    }
}

/// Membership table: one row per pool, loaded once and read-only after.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PoolMembership {
    rows: Vec<MembershipRow>,
}

impl PoolMembership {
    /// Wraps a list of rows.
    #[must_use]
    pub fn new(rows: Vec<MembershipRow>) -> Self {
        Self { rows }
    }

    /// Returns all rows in table order.
    #[must_use]
    pub fn rows(&self) -> &[MembershipRow] {
        &self.rows
    }

    /// Finds the first row named `pool`.
    #[must_use]
    pub fn get(&self, pool: &str) -> Option<&MembershipRow> {
        self.rows.iter().find(|r| r.pool_name == pool)
    }

    /// Allocation fraction of the [`LIQUIDITY_POOL`] row.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::DataIntegrity`] if the row is missing or has no
    /// allocation.
    pub fn liquidity_fraction(&self) -> Result<f64> {
        let row = self.get(LIQUIDITY_POOL).ok_or_else(|| {
            SimError::DataIntegrity(format!("no `{LIQUIDITY_POOL}` row in membership table"))
        })?;
        row.allocation.ok_or_else(|| {
            SimError::DataIntegrity(format!("`{LIQUIDITY_POOL}` row has no allocation"))
        })
    }
}

/// Pool names partitioned by membership flag.
///
/// The sets are not required to be disjoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PoolSets {
    circulation: BTreeSet<String>,
    investor: BTreeSet<String>,
}

impl PoolSets {
    /// Creates pool sets from their parts.
    #[must_use]
    pub fn new(circulation: BTreeSet<String>, investor: BTreeSet<String>) -> Self {
        Self {
            circulation,
            investor,
        }
    }

    /// Pools counted toward circulating supply.
    #[must_use]
    pub fn circulation(&self) -> &BTreeSet<String> {
        &self.circulation
    }

    /// Pools owned by investors.
    #[must_use]
    pub fn investor(&self) -> &BTreeSet<String> {
        &self.investor
    }

    /// `true` if `pool` is a circulation pool.
    #[must_use]
    pub fn is_circulation(&self, pool: &str) -> bool {
        self.circulation.contains(pool)
    }

    /// `true` if `pool` is an investor pool.
    #[must_use]
    pub fn is_investor(&self, pool: &str) -> bool {
        self.investor.contains(pool)
    }

    /// `true` if `pool` feeds the selling-pressure schedule for `source`.
    #[must_use]
    pub fn selects(&self, source: PressureSource, pool: &str) -> bool {
        match source {
            PressureSource::Circulation => self.is_circulation(pool),
            PressureSource::Investors => self.is_investor(pool),
            PressureSource::All => true,
        }
    }
}

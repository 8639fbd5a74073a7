//! One month of per-pool token releases.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Month;

/// Tokens released in a single month, keyed by pool name.
///
/// Amounts are non-negative token quantities.  Pool names are unique within
/// a record by construction of the map.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RawEmissionRecord")]
pub struct EmissionRecord {
    month: Month,
    amounts: BTreeMap<String, f64>,
}

/// Unchecked wire form; deserialized amounts go through
/// [`EmissionRecord::add`].
#[derive(Deserialize)]
struct RawEmissionRecord {
    month: Month,
    #[serde(default)]
    amounts: BTreeMap<String, f64>,
}

impl From<RawEmissionRecord> for EmissionRecord {
    fn from(raw: RawEmissionRecord) -> Self {
        Self::from_amounts(raw.month, raw.amounts)
    }
}

impl EmissionRecord {
    /// Creates an empty record for `month`.
    #[must_use]
    pub fn new(month: Month) -> Self {
        Self {
            month,
            amounts: BTreeMap::new(),
        }
    }

    /// Creates a record from `(pool, amount)` pairs; duplicate pools are
    /// summed.
    #[must_use]
    pub fn from_amounts<I, S>(month: Month, amounts: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut record = Self::new(month);
        for (pool, amount) in amounts {
            record.add(pool, amount);
        }
        record
    }

    /// Adds `amount` to `pool`'s release for this month.
    ///
    /// A negative or non-finite amount is logged and counted as `0.0`; the
    /// pool is still recorded.
    pub fn add(&mut self, pool: impl Into<String>, amount: f64) {
        let pool = pool.into();
        let amount = if amount.is_finite() && amount >= 0.0 {
            amount
        } else {
            tracing::warn!(
                pool = %pool,
                month = %self.month,
                amount,
                "invalid emission amount, using 0"
            );
            0.0
        };
        *self.amounts.entry(pool).or_insert(0.0) += amount;
    }

    /// Returns the month of this record.
    #[must_use]
    pub const fn month(&self) -> Month {
        self.month
    }

    /// Returns the release of `pool`, `0.0` if the pool is absent.
    #[must_use]
    pub fn amount(&self, pool: &str) -> f64 {
        self.amounts.get(pool).copied().unwrap_or(0.0)
    }

    /// Iterates `(pool, amount)` pairs in pool-name order.
    pub fn amounts(&self) -> impl Iterator<Item = (&str, f64)> {
        self.amounts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Names of the pools present in this record.
    pub fn pools(&self) -> impl Iterator<Item = &str> {
        self.amounts.keys().map(String::as_str)
    }

    /// Sum of all pool releases for the month.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.amounts.values().sum()
    }

    /// Sum of the releases of the pools `include` accepts.
    #[must_use]
    pub fn total_where(&self, mut include: impl FnMut(&str) -> bool) -> f64 {
        self.amounts
            .iter()
            .filter(|(pool, _)| include(pool))
            .map(|(_, v)| *v)
            .sum()
    }

    /// Multiplies every pool release by `factor`.
    pub(crate) fn scale(&mut self, factor: f64) {
        for v in self.amounts.values_mut() {
            *v *= factor;
        }
    }

    /// Drops pools `keep` rejects.
    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.amounts.retain(|pool, _| keep(pool));
    }

    /// Folds another record's releases into this one.
    pub(crate) fn merge(&mut self, other: &Self) {
        for (pool, amount) in &other.amounts {
            self.add(pool.clone(), *amount);
        }
    }
}

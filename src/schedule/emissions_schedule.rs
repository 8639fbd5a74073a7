//! Month-indexed emission schedule.
//!
//! # Normalisation
//!
//! 1. Drop pools the filter rejects.
//! 2. Scale every remaining amount by `pressure / 100`.
//! 3. Sum records that share a month.
//! 4. Fill every month from `0` to the last month present, so gaps read as
//!    zero releases.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::{EmissionRecord, Month, Percentage, PoolSets, PressureSource};

/// Canonical schedule: exactly one record per month, contiguous from TGE.
///
/// # Examples
///
/// ```
/// use unlock_impact::domain::{EmissionRecord, Month, Percentage};
/// use unlock_impact::schedule::EmissionsSchedule;
///
/// let raw = vec![
///     EmissionRecord::from_amounts(Month::new(0), [("Seed", 100.0)]),
///     EmissionRecord::from_amounts(Month::new(2), [("Seed", 40.0)]),
///     EmissionRecord::from_amounts(Month::new(2), [("Seed", 10.0)]),
/// ];
/// let half = Percentage::new(50.0).expect("in range");
/// let schedule = EmissionsSchedule::normalize(&raw, None, half);
///
/// assert_eq!(schedule.len(), 3);
/// assert_eq!(schedule.total_at(Month::new(1)), 0.0);
/// assert_eq!(schedule.total_at(Month::new(2)), 25.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RawSchedule")]
pub struct EmissionsSchedule {
    records: Vec<EmissionRecord>,
}

/// Wire form; deserialized records are re-normalised at full pressure.
#[derive(Deserialize)]
struct RawSchedule {
    records: Vec<EmissionRecord>,
}

impl From<RawSchedule> for EmissionsSchedule {
    fn from(raw: RawSchedule) -> Self {
        Self::normalize(&raw.records, None, Percentage::HUNDRED)
    }
}

impl EmissionsSchedule {
    /// Normalises raw records.
    ///
    /// `pools` lists the pool names to retain; `None` keeps every pool.
    /// Names not present in the records are ignored.  Records later than
    /// [`Month::MAX_SCHEDULE`] are dropped with a warning.
    #[must_use]
    pub fn normalize(
        raw: &[EmissionRecord],
        pools: Option<&BTreeSet<String>>,
        pressure: Percentage,
    ) -> Self {
        Self::normalize_where(raw, |pool| pools.map_or(true, |p| p.contains(pool)), pressure)
    }

    /// Normalises raw records keeping the pools `source` selects.
    #[must_use]
    pub fn for_source(
        raw: &[EmissionRecord],
        sets: &PoolSets,
        source: PressureSource,
        pressure: Percentage,
    ) -> Self {
        Self::normalize_where(raw, |pool| sets.selects(source, pool), pressure)
    }

    fn normalize_where(
        raw: &[EmissionRecord],
        mut keep: impl FnMut(&str) -> bool,
        pressure: Percentage,
    ) -> Self {
        let factor = pressure.as_fraction();
        let mut by_month: BTreeMap<Month, EmissionRecord> = BTreeMap::new();
        for record in raw {
            if record.month() > Month::MAX_SCHEDULE {
                tracing::warn!(
                    month = %record.month(),
                    "emission record past the schedule limit, dropped"
                );
                continue;
            }
            let mut filtered = record.clone();
            filtered.retain(&mut keep);
            filtered.scale(factor);
            by_month
                .entry(record.month())
                .or_insert_with(|| EmissionRecord::new(record.month()))
                .merge(&filtered);
        }

        let Some(last) = by_month.keys().next_back().copied() else {
            return Self::default();
        };
        let records = (0..=last.get())
            .map(Month::new)
            .map(|m| by_month.remove(&m).unwrap_or_else(|| EmissionRecord::new(m)))
            .collect();
        Self { records }
    }

    /// Returns the records in month order.
    #[must_use]
    pub fn records(&self) -> &[EmissionRecord] {
        &self.records
    }

    /// Number of months in the schedule.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` if the schedule has no months.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The last month of the schedule.
    #[must_use]
    pub fn last_month(&self) -> Option<Month> {
        self.records.last().map(EmissionRecord::month)
    }

    /// The record for `month`, if inside the schedule.
    #[must_use]
    pub fn get(&self, month: Month) -> Option<&EmissionRecord> {
        self.records.get(month.index())
    }

    /// Total released in `month`; `0.0` outside the schedule.
    #[must_use]
    pub fn total_at(&self, month: Month) -> f64 {
        self.get(month).map_or(0.0, EmissionRecord::total)
    }

    /// Monthly totals in month order.
    #[must_use]
    pub fn totals(&self) -> Vec<f64> {
        self.records.iter().map(EmissionRecord::total).collect()
    }

    /// Sum of releases from TGE through `month` inclusive.
    #[must_use]
    pub fn cumulative_through(&self, month: Month) -> f64 {
        self.records
            .iter()
            .take(month.index().saturating_add(1))
            .map(EmissionRecord::total)
            .sum()
    }
}

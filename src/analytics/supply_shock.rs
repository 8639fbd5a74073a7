//! Supply shock: how dilutive each month's unlock is.
//!
//! `supply_shock(m) = released(m) / cumulative(m - 1)`, defined as `0` at
//! TGE and whenever the prior cumulative supply is zero.

use serde::{Deserialize, Serialize};

use crate::domain::Month;
use crate::schedule::EmissionsSchedule;
use crate::traits::MonthSeries;

/// Supply-shock figures for one month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupplyShockRecord {
    /// Month of the record.
    pub month: Month,
    /// Tokens released in this month.
    pub total_released: f64,
    /// Tokens released from TGE through this month.
    pub cumulative_released: f64,
    /// `total_released / previous cumulative`, as a ratio.
    pub supply_shock: f64,
}

impl SupplyShockRecord {
    /// The shock expressed as a percentage.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        self.supply_shock * 100.0
    }
}

/// Ordered supply-shock records, one per schedule month.
///
/// Records are contiguous from TGE, so record `i` is month `i`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SupplyShockSeries {
    records: Vec<SupplyShockRecord>,
}

impl SupplyShockSeries {
    /// Returns the records in month order.
    #[must_use]
    pub fn records(&self) -> &[SupplyShockRecord] {
        &self.records
    }

    /// Record for `month`, if in range.
    #[must_use]
    pub fn get(&self, month: Month) -> Option<&SupplyShockRecord> {
        self.records.get(month.index()).filter(|r| r.month == month)
    }

    /// Shock percentages in month order.
    #[must_use]
    pub fn percentages(&self) -> Vec<f64> {
        self.records.iter().map(SupplyShockRecord::percentage).collect()
    }

    /// Shock strength of `month` relative to the whole series, in `[0, 100]`.
    ///
    /// `(shock - min) / (max - min) * 100`; `0` when every month has the
    /// same shock, `None` outside the series.
    #[must_use]
    pub fn strength_at(&self, month: Month) -> Option<f64> {
        let shock = self.get(month)?.supply_shock;
        let (min, max) = self
            .records
            .iter()
            .map(|r| r.supply_shock)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
                (lo.min(s), hi.max(s))
            });
        let range = max - min;
        if range > 0.0 {
            Some((shock - min) / range * 100.0)
        } else {
            Some(0.0)
        }
    }
}

impl MonthSeries for SupplyShockSeries {
    /// Shock percentage for `month`.
    fn value_at_month(&self, month: Month) -> Option<f64> {
        self.get(month).map(SupplyShockRecord::percentage)
    }
}

/// Derives [`SupplyShockSeries`] from a schedule.
#[derive(Debug, Clone, Copy, Default)]
pub struct SupplyShockCalculator;

impl SupplyShockCalculator {
    /// Computes cumulative supply and supply shock for every month.
    ///
    /// # Examples
    ///
    /// ```
    /// use unlock_impact::analytics::SupplyShockCalculator;
    /// use unlock_impact::domain::{EmissionRecord, Month, Percentage};
    /// use unlock_impact::schedule::EmissionsSchedule;
    /// use unlock_impact::traits::MonthSeries;
    ///
    /// let raw = vec![
    ///     EmissionRecord::from_amounts(Month::new(0), [("Seed", 100.0)]),
    ///     EmissionRecord::from_amounts(Month::new(1), [("Seed", 50.0)]),
    /// ];
    /// let schedule = EmissionsSchedule::normalize(&raw, None, Percentage::HUNDRED);
    /// let shock = SupplyShockCalculator::compute(&schedule);
    ///
    /// assert_eq!(shock.value_at(0), Some(0.0));
    /// assert_eq!(shock.value_at(1), Some(50.0));
    /// assert_eq!(shock.value_at(-1), None);
    /// ```
    #[must_use]
    pub fn compute(schedule: &EmissionsSchedule) -> SupplyShockSeries {
        let mut cumulative = 0.0_f64;
        let records = schedule
            .records()
            .iter()
            .map(|record| {
                let total = record.total();
                let supply_shock = if cumulative > 0.0 {
                    total / cumulative
                } else {
                    0.0
                };
                cumulative += total;
                SupplyShockRecord {
                    month: record.month(),
                    total_released: total,
                    cumulative_released: cumulative,
                    supply_shock,
                }
            })
            .collect();
        SupplyShockSeries { records }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{EmissionRecord, Percentage};

    fn schedule(totals: &[f64]) -> EmissionsSchedule {
        let raw: Vec<EmissionRecord> = totals
            .iter()
            .zip(0_u32..)
            .map(|(t, m)| EmissionRecord::from_amounts(Month::new(m), [("Pool", *t)]))
            .collect();
        EmissionsSchedule::normalize(&raw, None, Percentage::HUNDRED)
    }

    #[test]
    fn get_matches_record_month() {
        let series = SupplyShockCalculator::compute(&schedule(&[100.0, 50.0, 25.0]));
        for (i, r) in series.records().iter().enumerate() {
            assert_eq!(r.month.index(), i);
            assert_eq!(series.get(r.month), Some(r));
        }

        let gapped = SupplyShockSeries {
            records: vec![SupplyShockRecord {
                month: Month::new(5),
                total_released: 1.0,
                cumulative_released: 1.0,
                supply_shock: 0.0,
            }],
        };
        assert_eq!(gapped.get(Month::TGE), None);
        assert_eq!(gapped.value_at(0), None);
    }

    #[test]
    fn tge_shock_is_zero() {
        let s = SupplyShockCalculator::compute(&schedule(&[100.0, 50.0]));
        let Some(tge) = s.get(Month::TGE) else {
            panic!("expected TGE record");
        };
        assert!(tge.supply_shock.abs() < f64::EPSILON);
        assert!((tge.cumulative_released - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn shock_divides_by_prior_cumulative() {
        let s = SupplyShockCalculator::compute(&schedule(&[100.0, 50.0, 75.0]));
        let Some(m2) = s.get(Month::new(2)) else {
            panic!("expected month 2");
        };
        assert!((m2.supply_shock - 0.5).abs() < 1e-12);
        assert!((m2.cumulative_released - 225.0).abs() < 1e-12);
    }

    #[test]
    fn zero_prior_cumulative_is_zero_shock() {
        let s = SupplyShockCalculator::compute(&schedule(&[0.0, 0.0, 10.0, 10.0]));
        assert_eq!(s.value_at(2), Some(0.0));
        assert_eq!(s.value_at(3), Some(100.0));
    }

    #[test]
    fn out_of_range_is_none() {
        let s = SupplyShockCalculator::compute(&schedule(&[1.0, 1.0]));
        assert_eq!(s.value_at(-1), None);
        assert_eq!(s.value_at(2), None);
    }

    #[test]
    fn strength_normalised_to_range() {
        let s = SupplyShockCalculator::compute(&schedule(&[100.0, 100.0, 50.0]));
        // shocks: 0, 1.0, 0.25
        assert_eq!(s.strength_at(Month::TGE), Some(0.0));
        assert_eq!(s.strength_at(Month::new(1)), Some(100.0));
        let Some(m2) = s.strength_at(Month::new(2)) else {
            panic!("expected strength");
        };
        assert!((m2 - 25.0).abs() < 1e-9);
        assert_eq!(s.strength_at(Month::new(3)), None);
    }

    #[test]
    fn flat_series_strength_is_zero() {
        let s = SupplyShockCalculator::compute(&schedule(&[0.0, 0.0]));
        assert_eq!(s.strength_at(Month::new(1)), Some(0.0));
    }
}

//! Cumulative-supply inflation factor.
//!
//! `factor(m) = release(0) / cumulative(m) * 100`, so the factor is `100`
//! at TGE and shrinks as circulating supply grows.  The simulator uses it
//! two ways:
//!
//! | Use | Formula |
//! |-----|---------|
//! | price inflator | `price = raw_price * factor / 100` |
//! | demand deflator (m ≠ 0) | `demand = recurring * 100 / factor` |

use serde::{Deserialize, Serialize};

use crate::domain::Month;
use crate::schedule::EmissionsSchedule;
use crate::traits::MonthSeries;

/// Factor used when the cumulative release of a month is zero.
pub const NEUTRAL_FACTOR: f64 = 100.0;

/// Inflation factor of one month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InflationPoint {
    /// Month of the point.
    pub month: Month,
    /// Tokens released from TGE through this month.
    pub cumulative_released: f64,
    /// Factor in percent.
    pub factor: f64,
}

/// Inflation factors in month order, point `i` being month `i`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InflationSeries {
    points: Vec<InflationPoint>,
}

impl InflationSeries {
    /// Returns the points in month order.
    #[must_use]
    pub fn points(&self) -> &[InflationPoint] {
        &self.points
    }

    /// Factor in percent for `month`.
    #[must_use]
    pub fn factor_at(&self, month: Month) -> Option<f64> {
        self.points
            .get(month.index())
            .filter(|p| p.month == month)
            .map(|p| p.factor)
    }

    /// Price multiplier `factor / 100`; `1.0` outside the series.
    #[must_use]
    pub fn multiplier(&self, month: Month) -> f64 {
        self.factor_at(month).unwrap_or(NEUTRAL_FACTOR) / 100.0
    }
}

impl MonthSeries for InflationSeries {
    fn value_at_month(&self, month: Month) -> Option<f64> {
        self.factor_at(month)
    }
}

/// Derives [`InflationSeries`] from a schedule.
#[derive(Debug, Clone, Copy, Default)]
pub struct InflationCalculator;

impl InflationCalculator {
    /// Computes the factor of every schedule month.
    ///
    /// A zero (or absent) TGE release is replaced by `1` as the base.
    #[must_use]
    pub fn compute(schedule: &EmissionsSchedule) -> InflationSeries {
        let month0 = schedule.total_at(Month::TGE);
        let base = if month0 > 0.0 { month0 } else { 1.0 };

        let mut cumulative = 0.0_f64;
        let points = schedule
            .records()
            .iter()
            .map(|record| {
                cumulative += record.total();
                let factor = if cumulative > 0.0 {
                    base / cumulative * 100.0
                } else {
                    NEUTRAL_FACTOR
                };
                InflationPoint {
                    month: record.month(),
                    cumulative_released: cumulative,
                    factor,
                }
            })
            .collect();
        InflationSeries { points }
    }
}

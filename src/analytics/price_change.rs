//! Month-over-month price changes.

use serde::{Deserialize, Serialize};

use crate::domain::Month;
use crate::traits::MonthSeries;

/// Percentage change of a price series, one entry per month; entry `i` is
/// month `i`.
///
/// The first month, and any month whose predecessor price is zero, reads
/// `0`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceChangeSeries {
    changes: Vec<f64>,
}

impl PriceChangeSeries {
    /// Computes changes from `prices` in month order.
    ///
    /// ```
    /// use unlock_impact::analytics::PriceChangeSeries;
    ///
    /// let changes = PriceChangeSeries::from_prices(&[1.0, 1.5, 0.75]);
    /// assert_eq!(changes.changes(), &[0.0, 50.0, -50.0]);
    /// ```
    #[must_use]
    pub fn from_prices(prices: &[f64]) -> Self {
        let changes = prices
            .iter()
            .enumerate()
            .map(|(i, &p)| match i.checked_sub(1).map(|j| prices[j]) {
                Some(prev) if prev != 0.0 => (p - prev) / prev * 100.0,
                _ => 0.0,
            })
            .collect();
        Self { changes }
    }

    /// Percentage changes in month order.
    #[must_use]
    pub fn changes(&self) -> &[f64] {
        &self.changes
    }

    /// Mean absolute change, `None` for an empty series.
    #[must_use]
    pub fn mean_absolute_change(&self) -> Option<f64> {
        let abs: Vec<f64> = self.changes.iter().map(|c| c.abs()).collect();
        mean(&abs)
    }
}

impl MonthSeries for PriceChangeSeries {
    fn value_at_month(&self, month: Month) -> Option<f64> {
        self.changes.get(month.index()).copied()
    }
}

/// Arithmetic mean of `values`, `None` when empty.
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = values.len() as f64;
    Some(values.iter().sum::<f64>() / n)
}

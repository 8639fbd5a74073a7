//! Month-indexed lookup shared by every result series.

use crate::domain::Month;

/// A series of scalar values indexed by [`Month`].
///
/// Lookups outside the series' range return `None` rather than failing, so
/// a caller can ask for "previous / selected / next month" without
/// range-checking first.
pub trait MonthSeries {
    /// Returns the value for `month`, `None` if the series has no entry.
    fn value_at_month(&self, month: Month) -> Option<f64>;

    /// Returns the value for a signed month offset; negative months (before
    /// TGE) are always `None`.
    fn value_at(&self, month: i64) -> Option<f64> {
        Month::from_signed(month).and_then(|m| self.value_at_month(m))
    }

    /// Values for the month before, at, and after `month`.
    fn neighbourhood(&self, month: Month) -> [Option<f64>; 3] {
        let m = i64::from(month.get());
        [self.value_at(m - 1), self.value_at(m), self.value_at(m + 1)]
    }
}

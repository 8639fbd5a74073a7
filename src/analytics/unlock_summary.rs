//! Unlock figures for an analysis month and its neighbours.

use serde::{Deserialize, Serialize};

use crate::domain::{EmissionRecord, Month, Percentage, PoolSets, Price};
use crate::schedule::EmissionsSchedule;

/// Unlock figures of a single month across every pool.
///
/// Months outside the schedule read as all-zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MonthUnlock {
    /// Month of the figures.
    pub month: Month,
    /// Tokens unlocked at the active selling pressure.
    pub emissions_at_pressure: f64,
    /// Tokens unlocked at 100 % pressure.
    pub emissions_full: f64,
    /// Share of the month's unlock coming from investor pools, in percent.
    pub investor_share_pct: f64,
    /// USD value of `emissions_at_pressure` at the starting price.
    pub usd_at_pressure: f64,
    /// USD value of `emissions_full` at the starting price.
    pub usd_full: f64,
    /// USD value of the investor part at the active pressure.
    pub investor_usd_at_pressure: f64,
    /// USD value of the investor part at 100 % pressure.
    pub investor_usd_full: f64,
}

/// Previous, selected and next month unlocks.
///
/// `previous` is `None` at TGE.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnlockSummary {
    /// Month before the analysis month.
    pub previous: Option<MonthUnlock>,
    /// The analysis month.
    pub selected: MonthUnlock,
    /// Month after the analysis month.
    pub next: MonthUnlock,
}

impl UnlockSummary {
    /// Builds the summary around `month`.
    ///
    /// `full` must be the all-pool schedule at 100 % pressure; `pressure`
    /// scales it down to the active selling pressure.
    #[must_use]
    pub fn around(
        full: &EmissionsSchedule,
        sets: &PoolSets,
        pressure: Percentage,
        starting_price: Price,
        month: Month,
    ) -> Self {
        let at = |m: Month| month_unlock(full, sets, pressure, starting_price, m);
        Self {
            previous: month.previous().map(&at),
            selected: at(month),
            next: month.next().map_or_else(MonthUnlock::default, &at),
        }
    }
}

fn month_unlock(
    full: &EmissionsSchedule,
    sets: &PoolSets,
    pressure: Percentage,
    price: Price,
    month: Month,
) -> MonthUnlock {
    let Some(record) = full.get(month) else {
        return MonthUnlock {
            month,
            ..MonthUnlock::default()
        };
    };
    let emissions_full = record.total();
    let investor_full = investor_total(record, sets);
    let investor_share_pct = if emissions_full > 0.0 {
        investor_full / emissions_full * 100.0
    } else {
        0.0
    };
    let emissions_at_pressure = pressure.apply(emissions_full);
    let investor_at_pressure = pressure.apply(investor_full);
    MonthUnlock {
        month,
        emissions_at_pressure,
        emissions_full,
        investor_share_pct,
        usd_at_pressure: price.value_of(emissions_at_pressure),
        usd_full: price.value_of(emissions_full),
        investor_usd_at_pressure: price.value_of(investor_at_pressure),
        investor_usd_full: price.value_of(investor_full),
    }
}

fn investor_total(record: &EmissionRecord, sets: &PoolSets) -> f64 {
    record.total_where(|pool| sets.is_investor(pool))
}

//! Serializable output of a scenario run.

use serde::{Deserialize, Serialize};

use crate::analytics::{InflationSeries, PriceChangeSeries, SupplyShockSeries, UnlockSummary};
use crate::domain::{Month, ReservePair};
use crate::engine::{ImpactCurve, SimulationRun};

/// Supply shock around the analysis month: `[previous, selected, next]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupplyShockSummary {
    /// Shock percentages; `None` outside the schedule.
    pub around: [Option<f64>; 3],
    /// Shock strength in `[0, 100]`; `None` outside the schedule.
    pub strength: [Option<f64>; 3],
}

/// Every series and summary a presentation layer renders.
///
/// Values are unformatted; currency and percentage formatting belong to the
/// consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    /// Month the summaries are centred on.
    pub analysis_month: Month,
    /// `launch_fdv / max_total_supply`.
    pub starting_price: f64,
    /// Launch reserves.
    pub initial_reserves: ReservePair,
    /// Circulating TGE unlock at the starting price.
    pub month_0_mcap: f64,
    /// `y_initial / month_0_mcap`; `None` when the market cap is zero.
    pub liquidity_backing: Option<f64>,
    /// USD restoring `y_initial` after the TGE sell.
    pub additional_quote_needed: f64,
    /// Mean reported price.
    pub average_price: Option<f64>,
    /// Mean monthly selling pressure in USD.
    pub average_selling_pressure: Option<f64>,
    /// Price path and per-month selling pressure.
    pub simulation: SimulationRun,
    /// Month-over-month price changes.
    pub price_changes: PriceChangeSeries,
    /// Supply shock per month.
    pub supply_shock: SupplyShockSeries,
    /// Supply shock around the analysis month.
    pub shock_summary: SupplyShockSummary,
    /// Inflation factor per month.
    pub inflation: InflationSeries,
    /// TGE price-impact curve.
    pub impact_curve: ImpactCurve,
    /// Unlocks around the analysis month.
    pub unlock_summary: UnlockSummary,
}

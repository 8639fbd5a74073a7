//! Month-by-month constant-product price simulation.
//!
//! # Transition (month `m`)
//!
//! 1. **Sell**: `x += tokens_sold(m)`, `y = k / x`; the drop in `y` is the
//!    month's selling pressure in USD.
//! 2. **Demand**: `demand = tge_demand` at TGE, otherwise
//!    `recurring_demand × 100 / factor(m)`; `y += demand`, `x = k / y`.
//! 3. **Price**: `raw = y / x`, reported `raw × factor(m) / 100`.
//!
//! `k` is fixed by the initial reserves and conserved by every step.

use serde::{Deserialize, Serialize};

use crate::analytics::{mean, InflationSeries, PriceChangeSeries, NEUTRAL_FACTOR};
use crate::domain::{Month, ReservePair};
use crate::error::Result;
use crate::math::CheckedFloat;
use crate::schedule::EmissionsSchedule;
use crate::traits::MonthSeries;

/// State and outputs of one simulated month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationStepResult {
    /// Simulated month.
    pub month: Month,
    /// Reported price: `raw_price × inflation_factor / 100`.
    pub price: f64,
    /// Spot price `y / x` at the end of the month.
    pub raw_price: f64,
    /// Inflation factor applied this month, in percent.
    pub inflation_factor: f64,
    /// USD injected by buy-side demand.
    pub demand: f64,
    /// USD drained from the pool by the month's sell-side pressure.
    pub selling_pressure: f64,
    /// Reserves at the end of the month.
    pub reserves: ReservePair,
}

/// Output of [`LiquidityPoolSimulator::simulate`].
///
/// Steps follow the schedule, which is contiguous from TGE, so step `i` is
/// month `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRun {
    initial: ReservePair,
    steps: Vec<SimulationStepResult>,
}

impl SimulationRun {
    /// Reserves the run started from.
    #[must_use]
    pub const fn initial(&self) -> &ReservePair {
        &self.initial
    }

    /// Per-month results in month order.
    #[must_use]
    pub fn steps(&self) -> &[SimulationStepResult] {
        &self.steps
    }

    /// Result for `month`, if simulated.
    #[must_use]
    pub fn step(&self, month: Month) -> Option<&SimulationStepResult> {
        self.steps.get(month.index()).filter(|s| s.month == month)
    }

    /// Reserves after the last month.
    #[must_use]
    pub fn final_reserves(&self) -> ReservePair {
        self.steps.last().map_or(self.initial, |s| s.reserves)
    }

    /// Reported prices in month order.
    #[must_use]
    pub fn prices(&self) -> Vec<f64> {
        self.steps.iter().map(|s| s.price).collect()
    }

    /// Demand injected per month.
    #[must_use]
    pub fn demands(&self) -> Vec<f64> {
        self.steps.iter().map(|s| s.demand).collect()
    }

    /// Selling pressure per month, in USD.
    #[must_use]
    pub fn selling_pressures(&self) -> Vec<f64> {
        self.steps.iter().map(|s| s.selling_pressure).collect()
    }

    /// Month-over-month change of the reported price.
    #[must_use]
    pub fn price_changes(&self) -> PriceChangeSeries {
        PriceChangeSeries::from_prices(&self.prices())
    }

    /// Mean reported price, `None` for an empty run.
    #[must_use]
    pub fn average_price(&self) -> Option<f64> {
        mean(&self.prices())
    }

    /// Mean monthly selling pressure, `None` for an empty run.
    #[must_use]
    pub fn average_selling_pressure(&self) -> Option<f64> {
        mean(&self.selling_pressures())
    }

    /// Total USD drained by selling pressure over the run.
    #[must_use]
    pub fn total_selling_pressure(&self) -> f64 {
        self.steps.iter().map(|s| s.selling_pressure).sum()
    }

    /// Total USD injected by demand over the run.
    #[must_use]
    pub fn total_demand(&self) -> f64 {
        self.steps.iter().map(|s| s.demand).sum()
    }
}

impl MonthSeries for SimulationRun {
    /// Reported price for `month`.
    fn value_at_month(&self, month: Month) -> Option<f64> {
        self.step(month).map(|s| s.price)
    }
}

/// Constant-product simulator over an emission schedule.
///
/// # Examples
///
/// ```
/// use unlock_impact::analytics::InflationCalculator;
/// use unlock_impact::domain::{EmissionRecord, Month, Percentage, ReservePair};
/// use unlock_impact::engine::LiquidityPoolSimulator;
/// use unlock_impact::schedule::EmissionsSchedule;
///
/// let raw = vec![
///     EmissionRecord::from_amounts(Month::new(0), [("Seed", 4_000_000.0)]),
///     EmissionRecord::from_amounts(Month::new(1), [("Seed", 1_000_000.0)]),
/// ];
/// let schedule = EmissionsSchedule::normalize(&raw, None, Percentage::HUNDRED);
/// let inflation = InflationCalculator::compute(&schedule);
/// let pool = ReservePair::new(40_000_000.0, 3_600_000.0).expect("reserves");
///
/// let run = LiquidityPoolSimulator::new(pool, 0.0, 0.0)
///     .simulate(&schedule, &inflation)
///     .expect("simulation");
/// assert_eq!(run.steps().len(), 2);
/// assert!((run.steps()[0].price - 0.074_380_165).abs() < 1e-8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiquidityPoolSimulator {
    initial: ReservePair,
    demand_tge: f64,
    demand_recurring: f64,
}

impl LiquidityPoolSimulator {
    /// Creates a simulator starting from `initial` reserves.
    ///
    /// `demand_tge` is injected at TGE; `demand_recurring` every later month
    /// before inflation scaling.
    #[must_use]
    pub const fn new(initial: ReservePair, demand_tge: f64, demand_recurring: f64) -> Self {
        Self {
            initial,
            demand_tge,
            demand_recurring,
        }
    }

    /// Reserves every run starts from.
    #[must_use]
    pub const fn initial(&self) -> &ReservePair {
        &self.initial
    }

    /// Runs every month of `schedule` in order.
    ///
    /// `schedule` must already be filtered and scaled to the active selling
    /// pressure.  Months missing from `inflation` use a neutral factor.
    ///
    /// # Errors
    ///
    /// - [`SimError::ZeroReserve`](crate::error::SimError::ZeroReserve) if a reserve stops being strictly
    ///   positive, for example when negative demand drains `y`.
    /// - [`SimError::NonFinite`](crate::error::SimError::NonFinite) / [`SimError::DivisionByZero`](crate::error::SimError::DivisionByZero) for
    ///   degenerate intermediates.
    pub fn simulate(
        &self,
        schedule: &EmissionsSchedule,
        inflation: &InflationSeries,
    ) -> Result<SimulationRun> {
        let mut pool = self.initial;
        let mut steps = Vec::with_capacity(schedule.len());

        for record in schedule.records() {
            let month = record.month();
            let selling_pressure = pool.sell_tokens(record.total())?;

            let factor = inflation.factor_at(month).unwrap_or(NEUTRAL_FACTOR);
            let demand = self.demand_for(month, factor)?;
            pool.inject_quote(demand)?;

            let raw_price = pool.price()?.get();
            let price = raw_price.safe_mul(factor)?.safe_div(100.0)?;
            tracing::debug!(
                %month,
                price,
                demand,
                selling_pressure,
                x = pool.x(),
                y = pool.y(),
                "simulated month"
            );
            steps.push(SimulationStepResult {
                month,
                price,
                raw_price,
                inflation_factor: factor,
                demand,
                selling_pressure,
                reserves: pool,
            });
        }

        Ok(SimulationRun {
            initial: self.initial,
            steps,
        })
    }

    fn demand_for(&self, month: Month, factor: f64) -> Result<f64> {
        if month.is_tge() {
            Ok(self.demand_tge)
        } else {
            self.demand_recurring.safe_mul(100.0)?.safe_div(factor)
        }
    }
}

//! End-to-end launch scenario.
//!
//! A [`Scenario`] owns one load of the input tables and derives everything
//! else on demand:
//!
//! ```text
//! EmissionsRepository ─► records + membership
//!                            │
//!            PoolClassifier ─┤
//!                            ▼
//!   pressure schedule (source, pressure %) ─► supply shock, inflation,
//!                                              simulation, impact curve
//!   circulating schedule (circulation, 100 %) ─► month-0 mcap, solvers
//!   full schedule (all pools, 100 %) ─► unlock summary
//! ```

mod report;

pub use report::{ScenarioReport, SupplyShockSummary};

use crate::analytics::{InflationCalculator, SupplyShockCalculator, UnlockSummary};
use crate::config::{LaunchConfig, LiquidityConfig};
use crate::domain::{
    EmissionRecord, Month, Percentage, PoolMembership, PoolSets, PressureSource, ReservePair,
};
use crate::engine::{
    additional_quote_needed, DemandEstimate, DemandSolver, LiquidityPoolSimulator,
    MarketCapTarget, PriceImpactCalculator, DEFAULT_CURVE_STEPS,
};
use crate::error::Result;
use crate::schedule::{EmissionsSchedule, PoolClassifier};
use crate::traits::{EmissionsRepository, FromConfig, MonthSeries};

/// A configured launch over one set of emission and membership tables.
#[derive(Debug, Clone)]
pub struct Scenario {
    config: LaunchConfig,
    records: Vec<EmissionRecord>,
    membership: PoolMembership,
    sets: PoolSets,
}

impl Scenario {
    /// Builds a scenario from already-loaded tables.
    ///
    /// # Errors
    ///
    /// Propagates any [`LaunchConfig::validate`] error.
    pub fn new(
        config: LaunchConfig,
        records: Vec<EmissionRecord>,
        membership: PoolMembership,
    ) -> Result<Self> {
        config.validate()?;
        let sets = PoolClassifier::classify(&membership);
        Ok(Self {
            config,
            records,
            membership,
            sets,
        })
    }

    /// Loads both tables from `repo` once and builds the scenario.
    ///
    /// # Errors
    ///
    /// Propagates repository and configuration errors.
    pub fn from_repository(
        config: LaunchConfig,
        repo: &impl EmissionsRepository,
    ) -> Result<Self> {
        let records = repo.load_emissions()?;
        let membership = repo.load_membership()?;
        tracing::info!(
            months = records.len(),
            pools = membership.rows().len(),
            "loaded scenario tables"
        );
        Self::new(config, records, membership)
    }

    /// The scenario's configuration.
    #[must_use]
    pub const fn config(&self) -> &LaunchConfig {
        &self.config
    }

    /// Circulation and investor pool sets.
    #[must_use]
    pub const fn pool_sets(&self) -> &PoolSets {
        &self.sets
    }

    /// Liquidity parameters: supply, starting price, the `Liquidity` row's
    /// allocation and the TGE share.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::DataIntegrity`](crate::error::SimError::DataIntegrity) if the membership table lacks a
    /// `Liquidity` allocation, or a configuration error.
    pub fn liquidity_config(&self) -> Result<LiquidityConfig> {
        LiquidityConfig::new(
            self.config.max_total_supply(),
            self.config.starting_price()?,
            self.membership.liquidity_fraction()?,
            self.config.tge_liquidity_pct(),
        )
    }

    /// Initial launch reserves.
    ///
    /// # Errors
    ///
    /// As [`liquidity_config`](Self::liquidity_config), plus
    /// [`SimError::ZeroReserve`](crate::error::SimError::ZeroReserve) for degenerate reserves.
    pub fn initial_reserves(&self) -> Result<ReservePair> {
        ReservePair::from_config(&self.liquidity_config()?)
    }

    /// Schedule of the configured pressure source at the configured selling
    /// pressure.
    #[must_use]
    pub fn pressure_schedule(&self) -> EmissionsSchedule {
        EmissionsSchedule::for_source(
            &self.records,
            &self.sets,
            self.config.pressure_source(),
            self.config.selling_pressure(),
        )
    }

    /// Circulation pools at 100 % pressure.
    #[must_use]
    pub fn circulating_schedule(&self) -> EmissionsSchedule {
        EmissionsSchedule::for_source(
            &self.records,
            &self.sets,
            PressureSource::Circulation,
            Percentage::HUNDRED,
        )
    }

    /// Every pool at 100 % pressure.
    #[must_use]
    pub fn full_schedule(&self) -> EmissionsSchedule {
        EmissionsSchedule::normalize(&self.records, None, Percentage::HUNDRED)
    }

    /// Price needed for `target_mcap` given the circulating supply through
    /// `month`.
    ///
    /// # Errors
    ///
    /// Propagates reserve and [`DemandSolver::price_for_target_mcap`]
    /// errors.
    pub fn price_for_target_mcap(
        &self,
        target_mcap: f64,
        month: Month,
    ) -> Result<MarketCapTarget> {
        let pool = self.initial_reserves()?;
        let supply = self.circulating_schedule().cumulative_through(month);
        DemandSolver::price_for_target_mcap(&pool, target_mcap, supply)
    }

    /// Monthly demand needed to bring `y` to `target_y` by `month`, selling
    /// circulating unlocks at the configured pressure.
    ///
    /// # Errors
    ///
    /// Only reserve construction can fail; the search itself never does.
    pub fn demand_for_target_reserve(
        &self,
        target_y: f64,
        month: Month,
    ) -> Result<DemandEstimate> {
        let pool = self.initial_reserves()?;
        let solver = DemandSolver::from_config(&self.config.solver())?;
        Ok(solver.monthly_demand_for_target_reserve(
            &pool,
            &self.circulating_schedule(),
            self.config.selling_pressure(),
            month,
            target_y,
        ))
    }

    /// Runs the full scenario.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::DataIntegrity`](crate::error::SimError::DataIntegrity) when the `Liquidity` allocation
    /// is missing and propagates any engine error.
    pub fn run(&self) -> Result<ScenarioReport> {
        let config = &self.config;
        let month = config.analysis_month();
        tracing::info!(
            %month,
            source = %config.pressure_source(),
            pressure = %config.selling_pressure(),
            "running scenario"
        );

        let starting_price = config.starting_price()?;
        let initial = self.initial_reserves()?;

        let pressure = self.pressure_schedule();
        let circulating = self.circulating_schedule();
        let full = self.full_schedule();

        let supply_shock = SupplyShockCalculator::compute(&pressure);
        let inflation = InflationCalculator::compute(&pressure);
        let simulation = LiquidityPoolSimulator::new(
            initial,
            config.expected_demand_tge(),
            config.expected_demand_recurring(),
        )
        .simulate(&pressure, &inflation)?;

        let tge_tokens_sold = pressure.total_at(Month::TGE);
        let impact_curve =
            PriceImpactCalculator::curve(&initial, tge_tokens_sold, DEFAULT_CURVE_STEPS)?;
        let additional_quote = additional_quote_needed(&initial, tge_tokens_sold)?;

        let month_0_mcap = starting_price.value_of(circulating.total_at(Month::TGE));
        let liquidity_backing = (month_0_mcap > 0.0).then(|| initial.y() / month_0_mcap);

        let unlock_summary = UnlockSummary::around(
            &full,
            &self.sets,
            config.selling_pressure(),
            starting_price,
            month,
        );
        let shock_summary = SupplyShockSummary {
            around: supply_shock.neighbourhood(month),
            strength: [
                month.previous().and_then(|m| supply_shock.strength_at(m)),
                supply_shock.strength_at(month),
                month.next().and_then(|m| supply_shock.strength_at(m)),
            ],
        };

        let report = ScenarioReport {
            analysis_month: month,
            starting_price: starting_price.get(),
            initial_reserves: initial,
            month_0_mcap,
            liquidity_backing,
            additional_quote_needed: additional_quote,
            average_price: simulation.average_price(),
            average_selling_pressure: simulation.average_selling_pressure(),
            price_changes: simulation.price_changes(),
            simulation,
            supply_shock,
            shock_summary,
            inflation,
            impact_curve,
            unlock_summary,
        };
        tracing::info!(
            months = report.simulation.steps().len(),
            analysis_price = report.simulation.value_at_month(month).unwrap_or_default(),
            "scenario finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use crate::domain::MembershipRow;

    fn membership(with_liquidity: bool) -> PoolMembership {
        let mut rows = vec![
            MembershipRow::new("Seed", true, true),
            MembershipRow::new("Team", false, false),
        ];
        if with_liquidity {
            rows.push(MembershipRow::new("Liquidity", true, false).with_allocation(0.2));
        }
        PoolMembership::new(rows)
    }

    fn records() -> Vec<EmissionRecord> {
        vec![
            EmissionRecord::from_amounts(
                Month::new(0),
                [("Seed", 4_000_000.0), ("Team", 1_000_000.0)],
            ),
            EmissionRecord::from_amounts(
                Month::new(1),
                [("Seed", 2_000_000.0), ("Team", 1_000_000.0)],
            ),
        ]
    }

    fn scenario(with_liquidity: bool) -> Scenario {
        let Ok(s) = Scenario::new(LaunchConfig::default(), records(), membership(with_liquidity))
        else {
            panic!("valid scenario");
        };
        s
    }

    #[test]
    fn missing_liquidity_row_is_data_integrity() {
        assert!(matches!(
            scenario(false).run(),
            Err(SimError::DataIntegrity(_))
        ));
    }

    #[test]
    fn scalar_summaries() {
        let Ok(report) = scenario(true).run() else {
            panic!("expected report");
        };
        assert!((report.starting_price - 0.09).abs() < 1e-12);
        assert!((report.initial_reserves.x() - 40_000_000.0).abs() < 1e-6);
        // Seed and Liquidity circulate; only Seed unlocks at TGE.
        assert!((report.month_0_mcap - 360_000.0).abs() < 1e-6);
        let Some(backing) = report.liquidity_backing else {
            panic!("expected backing");
        };
        assert!((backing - 10.0).abs() < 1e-9);
        assert!((report.additional_quote_needed - 327_272.727_272).abs() < 1e-3);
    }

    #[test]
    fn report_series_cover_schedule() {
        let Ok(report) = scenario(true).run() else {
            panic!("expected report");
        };
        assert_eq!(report.simulation.steps().len(), 2);
        assert_eq!(report.supply_shock.records().len(), 2);
        assert_eq!(report.inflation.points().len(), 2);
        assert_eq!(report.impact_curve.points().len(), 13);
        assert_eq!(report.shock_summary.around[0], None);
        assert!(report.unlock_summary.previous.is_none());
    }

    #[test]
    fn solver_wrappers() {
        let s = scenario(true);
        let Ok(target) = s.price_for_target_mcap(360_000.0, Month::TGE) else {
            panic!("expected target");
        };
        assert!((target.required_price - 0.09).abs() < 1e-12);

        let Ok(est) = s.demand_for_target_reserve(3_600_000.0, Month::new(1)) else {
            panic!("expected estimate");
        };
        assert!(est.converged);
    }
}

//! Scenario parameters chosen by the analyst.

use serde::{Deserialize, Serialize};

use super::SolverConfig;
use crate::domain::{Month, Percentage, PressureSource, Price};
use crate::error::{Result, SimError};

/// Default maximum token supply.
pub const DEFAULT_MAX_TOTAL_SUPPLY: f64 = 1_000_000_000.0;

/// Default launch fully diluted valuation in USD.
pub const DEFAULT_LAUNCH_FDV: f64 = 90_000_000.0;

/// Default USD demand assumed at TGE and in every later month.
pub const DEFAULT_EXPECTED_DEMAND: f64 = 100_000.0;

/// Default share of the liquidity allocation deployed at TGE.
pub const DEFAULT_TGE_LIQUIDITY_PCT: f64 = 20.0;

/// Everything a "what-if" launch scenario is parameterised by.
///
/// Fields missing from a deserialized document take the values of
/// [`LaunchConfig::default`]; call [`validate`](Self::validate) (or use
/// [`from_json_str`](Self::from_json_str), which does) before running.
///
/// # Examples
///
/// ```
/// use unlock_impact::config::LaunchConfig;
/// use unlock_impact::domain::Percentage;
///
/// let cfg = LaunchConfig::default()
///     .with_selling_pressure(Percentage::new(50.0).expect("in range"));
/// assert!(cfg.validate().is_ok());
/// assert!((cfg.starting_price().expect("price").get() - 0.09).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    max_total_supply: f64,
    launch_fdv: f64,
    tge_liquidity_pct: Percentage,
    selling_pressure: Percentage,
    pressure_source: PressureSource,
    expected_demand_tge: f64,
    expected_demand_recurring: f64,
    analysis_month: Month,
    solver: SolverConfig,
}

impl LaunchConfig {
    /// Creates a config with the given supply, valuation and TGE liquidity
    /// share; every other field takes its default.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] if supply or valuation
    /// are not positive.
    pub fn new(
        max_total_supply: f64,
        launch_fdv: f64,
        tge_liquidity_pct: Percentage,
    ) -> Result<Self> {
        let config = Self {
            max_total_supply,
            launch_fdv,
            tge_liquidity_pct,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Json`] for malformed JSON or out-of-range
    /// percentages, and any [`validate`](Self::validate) error.
    #[cfg(feature = "json")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] if supply or valuation are
    /// not positive, or if a demand assumption is negative or not finite.
    pub fn validate(&self) -> Result<()> {
        if !self.max_total_supply.is_finite() || self.max_total_supply <= 0.0 {
            return Err(SimError::InvalidConfiguration(
                "max total supply must be positive",
            ));
        }
        if !self.launch_fdv.is_finite() || self.launch_fdv <= 0.0 {
            return Err(SimError::InvalidConfiguration(
                "launch FDV must be positive",
            ));
        }
        if !self.expected_demand_tge.is_finite() || self.expected_demand_tge < 0.0 {
            return Err(SimError::InvalidConfiguration(
                "TGE demand must be non-negative",
            ));
        }
        if !self.expected_demand_recurring.is_finite() || self.expected_demand_recurring < 0.0 {
            return Err(SimError::InvalidConfiguration(
                "recurring demand must be non-negative",
            ));
        }
        self.solver.validate()
    }

    /// Sets the selling-pressure assumption.
    #[must_use]
    pub fn with_selling_pressure(mut self, selling_pressure: Percentage) -> Self {
        self.selling_pressure = selling_pressure;
        self
    }

    /// Sets which pools feed the selling-pressure schedule.
    #[must_use]
    pub fn with_pressure_source(mut self, source: PressureSource) -> Self {
        self.pressure_source = source;
        self
    }

    /// Sets the USD demand injected at TGE and in each later month.
    #[must_use]
    pub fn with_expected_demand(mut self, tge: f64, recurring: f64) -> Self {
        self.expected_demand_tge = tge;
        self.expected_demand_recurring = recurring;
        self
    }

    /// Sets the month the unlock summary is centred on.
    #[must_use]
    pub fn with_analysis_month(mut self, month: Month) -> Self {
        self.analysis_month = month;
        self
    }

    /// Sets the demand-search termination parameters.
    #[must_use]
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Launch price `launch_fdv / max_total_supply`.
    ///
    /// # Errors
    ///
    /// Propagates [`Price::from_fdv`] failures.
    pub fn starting_price(&self) -> Result<Price> {
        Price::from_fdv(self.launch_fdv, self.max_total_supply)
    }

    /// Returns the maximum total token supply.
    #[must_use]
    pub const fn max_total_supply(&self) -> f64 {
        self.max_total_supply
    }

    /// Returns the launch fully diluted valuation.
    #[must_use]
    pub const fn launch_fdv(&self) -> f64 {
        self.launch_fdv
    }

    /// Returns the share of the liquidity allocation deployed at TGE.
    #[must_use]
    pub const fn tge_liquidity_pct(&self) -> Percentage {
        self.tge_liquidity_pct
    }

    /// Returns the selling-pressure assumption.
    #[must_use]
    pub const fn selling_pressure(&self) -> Percentage {
        self.selling_pressure
    }

    /// Returns the selling-pressure pool selection.
    #[must_use]
    pub const fn pressure_source(&self) -> PressureSource {
        self.pressure_source
    }

    /// Returns the USD demand injected at TGE.
    #[must_use]
    pub const fn expected_demand_tge(&self) -> f64 {
        self.expected_demand_tge
    }

    /// Returns the USD demand injected in each month after TGE.
    #[must_use]
    pub const fn expected_demand_recurring(&self) -> f64 {
        self.expected_demand_recurring
    }

    /// Returns the month the unlock summary is centred on.
    #[must_use]
    pub const fn analysis_month(&self) -> Month {
        self.analysis_month
    }

    /// Returns the demand-search parameters.
    #[must_use]
    pub const fn solver(&self) -> SolverConfig {
        self.solver
    }
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            max_total_supply: DEFAULT_MAX_TOTAL_SUPPLY,
            launch_fdv: DEFAULT_LAUNCH_FDV,
            tge_liquidity_pct: Percentage::new(DEFAULT_TGE_LIQUIDITY_PCT)
                .unwrap_or(Percentage::HUNDRED),
            selling_pressure: Percentage::HUNDRED,
            pressure_source: PressureSource::Circulation,
            expected_demand_tge: DEFAULT_EXPECTED_DEMAND,
            expected_demand_recurring: DEFAULT_EXPECTED_DEMAND,
            analysis_month: Month::TGE,
            solver: SolverConfig::default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let cfg = LaunchConfig::default();
        assert!(cfg.validate().is_ok());
        assert!((cfg.tge_liquidity_pct().get() - 20.0).abs() < f64::EPSILON);
        assert_eq!(cfg.selling_pressure(), Percentage::HUNDRED);
        assert_eq!(cfg.pressure_source(), PressureSource::Circulation);
    }

    #[test]
    fn starting_price_from_fdv() {
        let Ok(p) = LaunchConfig::default().starting_price() else {
            panic!("expected Ok");
        };
        assert!((p.get() - 0.09).abs() < 1e-12);
    }

    #[test]
    fn new_rejects_bad_supply() {
        assert!(LaunchConfig::new(0.0, 1.0, Percentage::HUNDRED).is_err());
        assert!(LaunchConfig::new(1e9, -1.0, Percentage::HUNDRED).is_err());
    }

    #[test]
    fn negative_demand_rejected() {
        let cfg = LaunchConfig::default().with_expected_demand(-1.0, 0.0);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn builders_apply() {
        let cfg = LaunchConfig::default()
            .with_pressure_source(PressureSource::Investors)
            .with_analysis_month(Month::new(6))
            .with_expected_demand(5.0, 7.0);
        assert_eq!(cfg.pressure_source(), PressureSource::Investors);
        assert_eq!(cfg.analysis_month(), Month::new(6));
        assert!((cfg.expected_demand_tge() - 5.0).abs() < f64::EPSILON);
        assert!((cfg.expected_demand_recurring() - 7.0).abs() < f64::EPSILON);
    }

    #[cfg(feature = "json")]
    #[test]
    fn from_json_partial_document() {
        let json = r#"{ "launch_fdv": 45000000.0, "selling_pressure": 25.0, "pressure_source": "All" }"#;
        let Ok(cfg) = LaunchConfig::from_json_str(json) else {
            panic!("expected Ok");
        };
        assert!((cfg.launch_fdv() - 45_000_000.0).abs() < f64::EPSILON);
        assert!((cfg.selling_pressure().get() - 25.0).abs() < f64::EPSILON);
        assert_eq!(cfg.pressure_source(), PressureSource::All);
        assert!((cfg.max_total_supply() - DEFAULT_MAX_TOTAL_SUPPLY).abs() < f64::EPSILON);
    }

    #[cfg(feature = "json")]
    #[test]
    fn from_json_rejects_out_of_range_percentage() {
        let json = r#"{ "selling_pressure": 150.0 }"#;
        assert!(LaunchConfig::from_json_str(json).is_err());
    }
}

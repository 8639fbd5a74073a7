//! Configuration for the iterative demand search.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Default acceptance band around the target USD reserve.
pub const DEFAULT_TOLERANCE: f64 = 1_000.0;

/// Default hard cap on search iterations.
pub const DEFAULT_MAX_ITERATIONS: u32 = 50;

/// Termination parameters for
/// [`DemandSolver::monthly_demand_for_target_reserve`](crate::engine::DemandSolver::monthly_demand_for_target_reserve).
///
/// The iteration cap guarantees termination whether or not the search
/// converges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    tolerance: f64,
    max_iterations: u32,
}

impl SolverConfig {
    /// Creates a new `SolverConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] if the tolerance is not
    /// positive or the iteration cap is zero.
    pub fn new(tolerance: f64, max_iterations: u32) -> Result<Self> {
        let config = Self {
            tolerance,
            max_iterations,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] if the tolerance is not
    /// positive and finite or the iteration cap is zero.
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(SimError::InvalidConfiguration(
                "solver tolerance must be positive",
            ));
        }
        if self.max_iterations == 0 {
            return Err(SimError::InvalidConfiguration(
                "solver needs at least one iteration",
            ));
        }
        Ok(())
    }

    /// Returns the acceptance band in USD.
    #[must_use]
    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns the iteration cap.
    #[must_use]
    pub const fn max_iterations(&self) -> u32 {
        self.max_iterations
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

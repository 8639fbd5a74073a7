//! Inverse problems on the launch pool.
//!
//! - [`DemandSolver::price_for_target_mcap`]: the price a market-cap target
//!   implies, and the `k`-preserving reserves that would quote it.
//! - [`DemandSolver::monthly_demand_for_target_reserve`]: the constant
//!   monthly demand that brings `y` to a target by a given month.
//!
//! The demand search adjusts its guess by `(target - y) / months` each
//! iteration.  The step is not damped, so convergence is not guaranteed;
//! the iteration cap bounds the work and the closest guess is returned when
//! the cap is hit.

use serde::{Deserialize, Serialize};

use crate::config::SolverConfig;
use crate::domain::{Month, Percentage, ReservePair};
use crate::error::Result;
use crate::math::CheckedFloat;
use crate::schedule::EmissionsSchedule;
use crate::traits::FromConfig;

/// Result of [`DemandSolver::price_for_target_mcap`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketCapTarget {
    /// `target_mcap / circulating_supply`.
    pub required_price: f64,
    /// Token reserve quoting `required_price` under the pool's `k`.
    pub new_x: f64,
    /// USD reserve quoting `required_price` under the pool's `k`.
    pub new_y: f64,
}

/// Result of [`DemandSolver::monthly_demand_for_target_reserve`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandEstimate {
    /// Monthly demand in USD; the closest guess when not converged.
    pub demand: f64,
    /// `y` reached by replaying the schedule with `demand`.
    pub achieved_y: f64,
    /// Iterations spent.
    pub iterations: u32,
    /// `true` if `|achieved_y - target| < tolerance`.
    pub converged: bool,
}

/// Solver for market-cap and reserve targets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemandSolver {
    tolerance: f64,
    max_iterations: u32,
}

impl FromConfig<SolverConfig> for DemandSolver {
    /// # Errors
    ///
    /// Propagates any error from [`SolverConfig::validate`].
    fn from_config(config: &SolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            tolerance: config.tolerance(),
            max_iterations: config.max_iterations(),
        })
    }
}

impl Default for DemandSolver {
    fn default() -> Self {
        let config = SolverConfig::default();
        Self {
            tolerance: config.tolerance(),
            max_iterations: config.max_iterations(),
        }
    }
}

impl DemandSolver {
    /// Acceptance band around the target reserve.
    #[must_use]
    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Hard cap on iterations.
    #[must_use]
    pub const fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Price implied by `target_mcap` over `circulating_supply`, with the
    /// reserves that quote it under `pool.k()`:
    /// `new_x = sqrt(k / price)`, `new_y = k / new_x`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::DivisionByZero`](crate::error::SimError::DivisionByZero) for a zero supply or a zero
    /// target, and [`SimError::NonFinite`](crate::error::SimError::NonFinite) for a negative required price.
    ///
    /// # Examples
    ///
    /// ```
    /// use unlock_impact::domain::ReservePair;
    /// use unlock_impact::engine::DemandSolver;
    ///
    /// let pool = ReservePair::new(40_000_000.0, 3_600_000.0).expect("reserves");
    /// let t = DemandSolver::price_for_target_mcap(&pool, 9_000_000.0, 100_000_000.0)
    ///     .expect("target");
    /// assert!((t.required_price - 0.09).abs() < 1e-12);
    /// assert!((t.new_x - 40_000_000.0).abs() < 1e-3);
    /// ```
    pub fn price_for_target_mcap(
        pool: &ReservePair,
        target_mcap: f64,
        circulating_supply: f64,
    ) -> Result<MarketCapTarget> {
        let required_price = target_mcap.safe_div(circulating_supply)?;
        let new_x = pool.k().safe_div(required_price)?.safe_sqrt()?;
        let new_y = pool.k().safe_div(new_x)?;
        Ok(MarketCapTarget {
            required_price,
            new_x,
            new_y,
        })
    }

    /// Searches for the constant monthly demand that brings `y` to
    /// `target_y` by `selected_month`.
    ///
    /// Each iteration replays months `1..=selected_month` from `pool`:
    /// sell `total × pressure`, recompute `y = k / x`, add the demand,
    /// recompute `x = k / y`.  Months missing from `schedule` sell nothing.
    ///
    /// Never fails.  At TGE there is no recurring month to inject into and
    /// the estimate is zero demand.  A guess that drives a reserve
    /// non-positive ends the search with the closest guess so far.
    #[must_use]
    pub fn monthly_demand_for_target_reserve(
        &self,
        pool: &ReservePair,
        schedule: &EmissionsSchedule,
        pressure: Percentage,
        selected_month: Month,
        target_y: f64,
    ) -> DemandEstimate {
        let months = selected_month.get();
        if months == 0 {
            return DemandEstimate {
                demand: 0.0,
                achieved_y: pool.y(),
                iterations: 0,
                converged: (pool.y() - target_y).abs() < self.tolerance,
            };
        }

        let mut guess = 0.0_f64;
        let mut closest = DemandEstimate {
            demand: 0.0,
            achieved_y: pool.y(),
            iterations: 0,
            converged: false,
        };
        let mut closest_diff = f64::INFINITY;

        for iteration in 1..=self.max_iterations {
            closest.iterations = iteration;
            let Some(y) = replay(pool, schedule, pressure, months, guess) else {
                tracing::warn!(iteration, guess, "demand guess drained the pool");
                return closest;
            };
            let diff = (y - target_y).abs();
            tracing::debug!(iteration, guess, y, diff, "demand iteration");
            if diff < closest_diff {
                closest_diff = diff;
                closest.demand = guess;
                closest.achieved_y = y;
            }
            if diff < self.tolerance {
                tracing::info!(iteration, demand = guess, "demand search converged");
                closest.converged = true;
                return closest;
            }
            guess += (target_y - y) / f64::from(months);
            if !guess.is_finite() {
                break;
            }
        }

        tracing::warn!(
            iterations = closest.iterations,
            demand = closest.demand,
            off_by = closest_diff,
            "demand search did not converge"
        );
        closest
    }
}

/// Final `y` after replaying `months` months with `demand`, `None` if a
/// reserve degenerates.
fn replay(
    pool: &ReservePair,
    schedule: &EmissionsSchedule,
    pressure: Percentage,
    months: u32,
    demand: f64,
) -> Option<f64> {
    let k = pool.k();
    let (mut x, mut y) = (pool.x(), pool.y());
    for m in 1..=months {
        x += pressure.apply(schedule.total_at(Month::new(m)));
        y = k / x + demand;
        x = k / y;
        if !(x.is_finite() && y.is_finite() && x > 0.0 && y > 0.0) {
            return None;
        }
    }
    Some(y)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use crate::domain::EmissionRecord;

    // -- helpers --------------------------------------------------------------

    fn launch_pool() -> ReservePair {
        let Ok(pool) = ReservePair::new(40_000_000.0, 3_600_000.0) else {
            panic!("valid reserves");
        };
        pool
    }

    fn schedule(totals: &[f64]) -> EmissionsSchedule {
        let raw: Vec<EmissionRecord> = totals
            .iter()
            .zip(0_u32..)
            .map(|(t, m)| EmissionRecord::from_amounts(Month::new(m), [("Pool", *t)]))
            .collect();
        EmissionsSchedule::normalize(&raw, None, Percentage::HUNDRED)
    }

    // -- market cap -------------------------------------------------------------

    #[test]
    fn target_mcap_preserves_k() {
        let pool = launch_pool();
        let Ok(t) = DemandSolver::price_for_target_mcap(&pool, 18_000_000.0, 100_000_000.0) else {
            panic!("expected Ok");
        };
        assert!((t.required_price - 0.18).abs() < 1e-12);
        assert!(((t.new_x * t.new_y) / pool.k() - 1.0).abs() < 1e-12);
        assert!((t.new_y / t.new_x - 0.18).abs() < 1e-12);
    }

    #[test]
    fn target_mcap_zero_supply() {
        let r = DemandSolver::price_for_target_mcap(&launch_pool(), 1.0, 0.0);
        assert!(matches!(r, Err(SimError::DivisionByZero)));
    }

    // -- demand search ------------------------------------------------------------

    #[test]
    fn converges_without_emissions() {
        let solver = DemandSolver::default();
        let est = solver.monthly_demand_for_target_reserve(
            &launch_pool(),
            &schedule(&[0.0, 0.0, 0.0, 0.0]),
            Percentage::HUNDRED,
            Month::new(3),
            3_900_000.0,
        );
        assert!(est.converged);
        assert_eq!(est.iterations, 2);
        assert!((est.demand - 100_000.0).abs() < 1e-6);
        assert!((est.achieved_y - 3_900_000.0).abs() < 1e-3);
    }

    #[test]
    fn converges_with_emissions() {
        let solver = DemandSolver::default();
        let est = solver.monthly_demand_for_target_reserve(
            &launch_pool(),
            &schedule(&[4_000_000.0, 1_000_000.0, 1_000_000.0]),
            Percentage::HUNDRED,
            Month::new(2),
            3_600_000.0,
        );
        assert!(est.converged);
        assert!(est.demand > 0.0);
        assert!((est.achieved_y - 3_600_000.0).abs() < solver.tolerance());
    }

    #[test]
    fn tge_month_is_zero_demand() {
        let solver = DemandSolver::default();
        let est = solver.monthly_demand_for_target_reserve(
            &launch_pool(),
            &schedule(&[1.0]),
            Percentage::HUNDRED,
            Month::TGE,
            5_000_000.0,
        );
        assert_eq!(est.iterations, 0);
        assert!(est.demand.abs() < f64::EPSILON);
        assert!(!est.converged);
    }

    #[test]
    fn unreachable_target_returns_closest() {
        let solver = DemandSolver::default();
        let est = solver.monthly_demand_for_target_reserve(
            &launch_pool(),
            &schedule(&[0.0, 0.0, 0.0, 0.0]),
            Percentage::HUNDRED,
            Month::new(3),
            -1_000_000.0,
        );
        assert!(!est.converged);
        assert!(est.iterations <= solver.max_iterations());
        assert!(est.demand.abs() < f64::EPSILON);
        assert!((est.achieved_y - 3_600_000.0).abs() < 1e-6);
    }

    #[test]
    fn from_config_validates() {
        let Ok(cfg) = SolverConfig::new(10.0, 5) else {
            panic!("valid config");
        };
        let Ok(solver) = DemandSolver::from_config(&cfg) else {
            panic!("expected solver");
        };
        assert_eq!(solver.max_iterations(), 5);
        assert!((solver.tolerance() - 10.0).abs() < f64::EPSILON);
    }
}

//! Property-based tests for the simulation invariants.
//!
//! 1. **k conservation**: every simulated month keeps `x · y = k`.
//! 2. **Supply-shock bounds**: shocks are non-negative and zero at TGE,
//!    including for raw tables holding negative, non-finite or
//!    non-numeric cells and out-of-range months.
//! 3. **Impact monotonicity**: selling more lowers the price, buying more
//!    raises it, and a zero trade quotes the spot price.
//! 4. **Solver termination**: the demand search returns within its cap for
//!    any target.

use proptest::prelude::*;

use crate::analytics::{InflationCalculator, SupplyShockCalculator};
use crate::domain::{EmissionRecord, Month, Percentage, ReservePair, TradeAction};
use crate::engine::{DemandSolver, LiquidityPoolSimulator, PriceImpactCalculator};
use crate::ingest::{Cell, EmissionsTable, Row};
use crate::math::approx_eq_rel;
use crate::schedule::EmissionsSchedule;
use crate::traits::MonthSeries;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn make_pool(x: f64, y: f64) -> ReservePair {
    let Ok(pool) = ReservePair::new(x, y) else {
        panic!("valid reserves");
    };
    pool
}

fn make_schedule(totals: &[f64], pressure: f64) -> EmissionsSchedule {
    let Ok(pct) = Percentage::new(pressure) else {
        panic!("valid percentage");
    };
    let raw: Vec<EmissionRecord> = totals
        .iter()
        .zip(0_u32..)
        .map(|(t, m)| EmissionRecord::from_amounts(Month::new(m), [("Pool", *t)]))
        .collect();
    EmissionsSchedule::normalize(&raw, None, pct)
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserves in [1e4, 1e9].
fn reserve_strategy() -> impl Strategy<Value = f64> {
    (10_000u64..=1_000_000_000u64).prop_map(|v| v as f64)
}

/// Monthly unlocks in [0, 5e7], up to 24 months.
fn totals_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec((0u64..=50_000_000u64).prop_map(|v| v as f64), 1..24)
}

/// Selling pressure in [0, 100].
fn pressure_strategy() -> impl Strategy<Value = f64> {
    (0u32..=100u32).prop_map(f64::from)
}

/// Raw amount cells: signed numbers, signed numeric text, non-finite text,
/// junk and blanks.
fn amount_cell_strategy() -> impl Strategy<Value = Cell> {
    prop_oneof![
        (-10_000_000.0f64..10_000_000.0).prop_map(Cell::Number),
        (-10_000_000i64..10_000_000i64).prop_map(|v| Cell::Text(v.to_string())),
        Just(Cell::from("inf")),
        Just(Cell::from("NaN")),
        Just(Cell::from("n/a")),
        Just(Cell::Empty),
    ]
}

/// Raw month cells, mostly valid with the occasional negative or huge one.
fn month_cell_strategy() -> impl Strategy<Value = Cell> {
    prop_oneof![
        8 => (0u32..24u32).prop_map(|m| Cell::Number(f64::from(m))),
        1 => Just(Cell::Number(20_000_000.0)),
        1 => Just(Cell::from("-1")),
    ]
}

/// Raw emissions tables of up to 24 rows over two pools.
fn raw_table_strategy() -> impl Strategy<Value = EmissionsTable> {
    prop::collection::vec(
        (month_cell_strategy(), amount_cell_strategy(), amount_cell_strategy()),
        1..24,
    )
    .prop_map(|rows| {
        EmissionsTable::new(
            rows.into_iter()
                .map(|(month, seed, team)| {
                    [("Month", month), ("Seed", seed), ("Team", team)]
                        .into_iter()
                        .map(|(k, v)| (k.to_owned(), v))
                        .collect::<Row>()
                })
                .collect(),
        )
    })
}

/// Non-negative demand in [0, 1e6].
fn demand_strategy() -> impl Strategy<Value = f64> {
    (0u64..=1_000_000u64).prop_map(|v| v as f64)
}

// ---------------------------------------------------------------------------
// Property 1: k conservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_simulation_conserves_k(
        x in reserve_strategy(),
        y in reserve_strategy(),
        totals in totals_strategy(),
        pressure in pressure_strategy(),
        tge in demand_strategy(),
        recurring in demand_strategy(),
    ) {
        let pool = make_pool(x, y);
        let schedule = make_schedule(&totals, pressure);
        let inflation = InflationCalculator::compute(&schedule);
        let Ok(run) = LiquidityPoolSimulator::new(pool, tge, recurring)
            .simulate(&schedule, &inflation)
        else {
            return Ok(());
        };
        prop_assert_eq!(run.steps().len(), schedule.len());
        for step in run.steps() {
            let product = step.reserves.x() * step.reserves.y();
            prop_assert!(
                approx_eq_rel(product, pool.k(), 1e-6),
                "k drifted at {}: {} vs {}", step.month, product, pool.k()
            );
            prop_assert!(step.selling_pressure > -1e-9 * pool.y().max(step.reserves.y()));
        }
    }
}

// ---------------------------------------------------------------------------
// Property 2: supply-shock bounds
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_supply_shock_non_negative(totals in totals_strategy()) {
        let shock = SupplyShockCalculator::compute(&make_schedule(&totals, 100.0));
        prop_assert_eq!(shock.value_at(0), Some(0.0));
        for record in shock.records() {
            prop_assert!(record.supply_shock >= 0.0);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_raw_table_supply_shock_non_negative(table in raw_table_strategy()) {
        let Ok(records) = table.to_records() else {
            panic!("month column present");
        };
        for record in &records {
            prop_assert!(record.month() <= Month::MAX_SCHEDULE);
            prop_assert!(record.amounts().all(|(_, v)| v.is_finite() && v >= 0.0));
        }
        let schedule = EmissionsSchedule::normalize(&records, None, Percentage::HUNDRED);
        prop_assert!(schedule.len() <= 24);

        let shock = SupplyShockCalculator::compute(&schedule);
        if !schedule.is_empty() {
            prop_assert_eq!(shock.value_at(0), Some(0.0));
        }
        for record in shock.records() {
            prop_assert!(record.supply_shock >= 0.0);
        }

        let pool = make_pool(40_000_000.0, 3_600_000.0);
        let inflation = InflationCalculator::compute(&schedule);
        let Ok(run) = LiquidityPoolSimulator::new(pool, 0.0, 0.0).simulate(&schedule, &inflation)
        else {
            panic!("non-negative unlocks keep reserves positive");
        };
        for step in run.steps() {
            prop_assert!(step.selling_pressure > -1e-9 * pool.y());
        }
    }
}

// ---------------------------------------------------------------------------
// Property 3: price-impact monotonicity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_zero_trade_quotes_spot(x in reserve_strategy(), y in reserve_strategy()) {
        let pool = make_pool(x, y);
        let Ok(sold) = PriceImpactCalculator::impact(&pool, 0.0, TradeAction::Sold) else {
            panic!("zero sell");
        };
        let Ok(bought) = PriceImpactCalculator::impact(&pool, 0.0, TradeAction::Bought) else {
            panic!("zero buy");
        };
        prop_assert!(approx_eq_rel(sold.get(), y / x, 1e-12));
        prop_assert!(approx_eq_rel(bought.get(), y / x, 1e-12));
    }

    #[test]
    fn prop_selling_more_lowers_price(
        x in reserve_strategy(),
        y in reserve_strategy(),
        a in 1u64..=1_000_000_000u64,
        extra in 1u64..=1_000_000_000u64,
    ) {
        let pool = make_pool(x, y);
        let small = a as f64;
        let large = small + extra as f64;
        let (Ok(p_small), Ok(p_large)) = (
            PriceImpactCalculator::impact(&pool, small, TradeAction::Sold),
            PriceImpactCalculator::impact(&pool, large, TradeAction::Sold),
        ) else {
            return Ok(());
        };
        prop_assert!(p_large.get() < p_small.get());
    }

    #[test]
    fn prop_buying_more_raises_price(
        x in reserve_strategy(),
        y in reserve_strategy(),
        a in 1u32..=98u32,
        extra in 1u32..=98u32,
    ) {
        let pool = make_pool(x, y);
        let small = f64::from(a.min(98));
        let large = f64::from((a + extra).min(99));
        prop_assume!(large > small);
        let (Ok(p_small), Ok(p_large)) = (
            PriceImpactCalculator::impact(&pool, small, TradeAction::Bought),
            PriceImpactCalculator::impact(&pool, large, TradeAction::Bought),
        ) else {
            return Ok(());
        };
        prop_assert!(p_large.get() > p_small.get());
    }
}

// ---------------------------------------------------------------------------
// Property 4: solver termination
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_solver_terminates(
        x in reserve_strategy(),
        y in reserve_strategy(),
        totals in totals_strategy(),
        pressure in pressure_strategy(),
        month in 0u32..30u32,
        target in -1.0e9f64..1.0e10f64,
    ) {
        let solver = DemandSolver::default();
        let Ok(pct) = Percentage::new(pressure) else {
            panic!("valid percentage");
        };
        let est = solver.monthly_demand_for_target_reserve(
            &make_pool(x, y),
            &make_schedule(&totals, 100.0),
            pct,
            Month::new(month),
            target,
        );
        prop_assert!(est.iterations <= solver.max_iterations());
        prop_assert!(est.demand.is_finite());
        if est.converged {
            prop_assert!((est.achieved_y - target).abs() < solver.tolerance());
        }
    }
}

//! End-to-end launch scenario example.
//!
//! Builds an emission schedule and pool membership table in memory, loads a
//! launch configuration from JSON, runs the constant-product simulation and
//! prints the resulting series.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=unlock_impact=debug cargo run --example launch_scenario
//! ```

use tracing::Level;
use tracing_subscriber::EnvFilter;

use unlock_impact::config::LaunchConfig;
use unlock_impact::domain::Month;
use unlock_impact::ingest::{Cell, EmissionsTable, InMemoryRepository, MembershipTable, Row};
use unlock_impact::scenario::Scenario;

fn row<const N: usize>(cells: [(&str, Cell); N]) -> Row {
    cells.into_iter().map(|(k, v)| (k.to_owned(), v)).collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    println!("=== Token Launch Scenario ===\n");

    // ── 1. Emission schedule ────────────────────────────────────────────
    //    Tokens unlocked per pool per month, as exported from a sheet.
    let emissions = EmissionsTable::new(
        (0..=12)
            .map(|m| {
                let month = f64::from(m);
                let seed = if m == 0 { 8_000_000.0 } else { 2_000_000.0 };
                let team = if m < 6 { 0.0 } else { 3_000_000.0 };
                row([
                    ("Month", Cell::from(month)),
                    ("Seed", Cell::from(seed)),
                    ("Private", Cell::from("1,500,000")),
                    ("Team", Cell::from(team)),
                    ("Ecosystem", Cell::from(500_000.0)),
                ])
            })
            .collect(),
    );

    // ── 2. Pool membership ──────────────────────────────────────────────
    //    Flags are matched against the exact literal "TRUE".
    let flag = |set: bool| Cell::from(if set { "TRUE" } else { "FALSE" });
    let membership = MembershipTable::new(vec![
        row([
            ("data_input", Cell::from("Seed")),
            ("circulation", flag(true)),
            ("is_investor", flag(true)),
        ]),
        row([
            ("data_input", Cell::from("Private")),
            ("circulation", flag(true)),
            ("is_investor", flag(true)),
        ]),
        row([
            ("data_input", Cell::from("Team")),
            ("circulation", flag(false)),
            ("is_investor", flag(false)),
        ]),
        row([
            ("data_input", Cell::from("Ecosystem")),
            ("circulation", flag(true)),
            ("is_investor", flag(false)),
        ]),
        row([
            ("data_input", Cell::from("Liquidity")),
            ("circulation", flag(true)),
            ("is_investor", flag(false)),
            ("allocation", Cell::from("20%")),
        ]),
    ]);
    let repo = InMemoryRepository::new(emissions, membership);

    // ── 3. Launch configuration ─────────────────────────────────────────
    let config = LaunchConfig::from_json_str(
        r#"{
            "launch_fdv": 90000000.0,
            "selling_pressure": 50.0,
            "pressure_source": "All",
            "expected_demand_tge": 150000.0,
            "expected_demand_recurring": 100000.0,
            "analysis_month": 6
        }"#,
    )?;
    println!("Config: {config:?}\n");

    // ── 4. Run the scenario ─────────────────────────────────────────────
    let scenario = Scenario::from_repository(config, &repo)?;
    let report = scenario.run()?;

    println!("Starting price:          ${:.4}", report.starting_price);
    println!(
        "Initial reserves:        x = {:.0}, y = {:.0}",
        report.initial_reserves.x(),
        report.initial_reserves.y()
    );
    println!("Month-0 market cap:      ${:.0}", report.month_0_mcap);
    if let Some(backing) = report.liquidity_backing {
        println!("Liquidity backing:       {:.2}%", backing * 100.0);
    }
    println!(
        "Additional USD needed:   ${:.0}",
        report.additional_quote_needed
    );

    // ── 5. Monthly series ───────────────────────────────────────────────
    println!(
        "\n{:>8} {:>10} {:>10} {:>14} {:>10}",
        "month", "price", "inflation", "sell pressure", "shock %"
    );
    for (step, shock) in report
        .simulation
        .steps()
        .iter()
        .zip(report.supply_shock.records())
    {
        println!(
            "{:>8} {:>10.5} {:>10.2} {:>14.0} {:>10.2}",
            step.month.to_string(),
            step.price,
            step.inflation_factor,
            step.selling_pressure,
            shock.percentage()
        );
    }

    // ── 6. Analysis month ───────────────────────────────────────────────
    let selected = report.unlock_summary.selected;
    println!("\n{} unlock:", selected.month);
    println!("  emissions (at pressure): {:.0}", selected.emissions_at_pressure);
    println!("  USD (at pressure):       ${:.0}", selected.usd_at_pressure);
    println!("  investor share:          {:.1}%", selected.investor_share_pct);
    println!("  supply shock around:     {:?}", report.shock_summary.around);

    // ── 7. TGE price impact ─────────────────────────────────────────────
    println!("\nTGE impact curve:");
    for point in report.impact_curve.points() {
        println!("  {:>14.0} tokens -> ${:.5}", point.tokens, point.price);
    }

    // ── 8. Inverse problems ─────────────────────────────────────────────
    let target = scenario.price_for_target_mcap(5_000_000.0, Month::new(6))?;
    println!(
        "\n$5M market cap at month 6 needs price ${:.4}",
        target.required_price
    );
    let demand = scenario.demand_for_target_reserve(report.initial_reserves.y(), Month::new(6))?;
    println!(
        "Monthly demand to hold y at launch level: ${:.0} ({} iterations, converged: {})",
        demand.demand, demand.iterations, demand.converged
    );

    Ok(())
}

//! # Unlock Impact
//!
//! Token-emission impact simulation: run a launch's monthly unlock schedule
//! against a constant-product (`x · y = k`) liquidity pool and estimate
//! price path, supply shock, selling pressure and slippage.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `json` | yes | JSON table repository and `LaunchConfig::from_json_str` |
//!
//! # Quick Start
//!
//! ```rust
//! use unlock_impact::config::LaunchConfig;
//! use unlock_impact::domain::{EmissionRecord, MembershipRow, Month, PoolMembership};
//! use unlock_impact::scenario::Scenario;
//!
//! // 1. Emission schedule: tokens unlocked per pool per month
//! let records = vec![
//!     EmissionRecord::from_amounts(Month::new(0), [("Seed", 4_000_000.0)]),
//!     EmissionRecord::from_amounts(Month::new(1), [("Seed", 1_000_000.0)]),
//! ];
//!
//! // 2. Pool membership, including the `Liquidity` allocation
//! let membership = PoolMembership::new(vec![
//!     MembershipRow::new("Seed", true, true),
//!     MembershipRow::new("Liquidity", true, false).with_allocation(0.2),
//! ]);
//!
//! // 3. Run with the default launch assumptions ($90M FDV, 1B supply)
//! let scenario = Scenario::new(LaunchConfig::default(), records, membership)
//!     .expect("valid scenario");
//! let report = scenario.run().expect("scenario ran");
//!
//! assert_eq!(report.simulation.steps().len(), 2);
//! assert!((report.initial_reserves.x() - 40_000_000.0).abs() < 1e-6);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │  Repository   │  InMemoryRepository / JsonFileRepository
//! └──────┬───────┘
//!        │ typed records (cells coerced once, at ingestion)
//!        ▼
//! ┌──────────────┐
//! │   Schedule    │  EmissionsSchedule::normalize, PoolClassifier
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │  Analytics    │  supply shock, inflation, unlock summary
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Engines     │  simulator, price impact, demand solver
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Scenario    │  ScenarioReport
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Month`](domain::Month), [`Percentage`](domain::Percentage), [`ReservePair`](domain::ReservePair), … |
//! | [`config`] | [`LaunchConfig`](config::LaunchConfig), [`LiquidityConfig`](config::LiquidityConfig), [`SolverConfig`](config::SolverConfig) |
//! | [`traits`] | [`FromConfig`](traits::FromConfig), [`MonthSeries`](traits::MonthSeries), [`EmissionsRepository`](traits::EmissionsRepository) |
//! | [`ingest`] | Raw tables and repositories |
//! | [`schedule`] | Schedule normalisation and pool classification |
//! | [`analytics`] | Supply shock, inflation, unlock and price-change series |
//! | [`engine`] | Simulator, price impact, demand solver |
//! | [`scenario`] | End-to-end orchestration |
//! | [`math`] | Finite-checked float arithmetic |
//! | [`error`] | [`SimError`](error::SimError) unified error enum |
//! | [`prelude`] | Convenience re-exports |

pub mod analytics;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod math;
pub mod prelude;
pub mod scenario;
pub mod schedule;
pub mod traits;

//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use unlock_impact::prelude::*;
//! ```

pub use crate::domain::{
    EmissionRecord, MembershipRow, Month, Percentage, PoolMembership, PoolSets, PressureSource,
    Price, ReservePair, TradeAction,
};

pub use crate::traits::{EmissionsRepository, FromConfig, MonthSeries};

pub use crate::config::{LaunchConfig, LiquidityConfig, SolverConfig};

pub use crate::error::{Result, SimError};

pub use crate::schedule::{EmissionsSchedule, PoolClassifier};

pub use crate::analytics::{InflationCalculator, SupplyShockCalculator, UnlockSummary};

pub use crate::engine::{
    DemandEstimate, DemandSolver, LiquidityPoolSimulator, PriceImpactCalculator, SimulationRun,
};

pub use crate::ingest::InMemoryRepository;
#[cfg(feature = "json")]
pub use crate::ingest::JsonFileRepository;

pub use crate::scenario::{Scenario, ScenarioReport};

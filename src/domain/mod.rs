//! Domain value types used throughout the simulation.
//!
//! Months, percentages, prices, reserve pairs and the typed records that
//! replace loosely-typed spreadsheet rows.  Constructors validate their
//! invariants so the engines never re-check them.

mod emission_record;
mod membership;
mod month;
mod percentage;
mod pressure_source;
mod price;
mod reserve_pair;
mod trade_action;

pub use emission_record::EmissionRecord;
pub use membership::{MembershipRow, PoolMembership, PoolSets, LIQUIDITY_POOL};
pub use month::Month;
pub use percentage::Percentage;
pub use pressure_source::PressureSource;
pub use price::Price;
pub use reserve_pair::ReservePair;
pub use trade_action::TradeAction;

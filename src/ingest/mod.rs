//! Ingestion boundary: raw spreadsheet-shaped tables to typed records.
//!
//! Malformed cells are coerced here and nowhere else:
//!
//! | Input | Result |
//! |-------|--------|
//! | non-numeric emission cell | `0.0`, logged at `warn` |
//! | blank emission cell | `0.0` |
//! | unparsable month | row dropped, logged at `warn` |
//! | membership flag other than `"TRUE"` | flag unset |
//!
//! Repositories implementing
//! [`EmissionsRepository`](crate::traits::EmissionsRepository) live here
//! too; [`JsonFileRepository`] requires the `json` feature.

mod cell;
mod repository;
mod table;

pub use cell::{Cell, TRUE_LITERAL};
pub use repository::InMemoryRepository;
#[cfg(feature = "json")]
pub use repository::{JsonFileRepository, EMISSIONS_FILE, MEMBERSHIP_FILE};
pub use table::{
    EmissionsTable, MembershipTable, Row, ALLOCATION_COLUMN, CIRCULATION_COLUMN, INVESTOR_COLUMN,
    POOL_NAME_COLUMN,
};

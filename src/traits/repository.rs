//! Source of the two input tables.
//!
//! The engines never fetch or cache data.  A scenario is handed an
//! [`EmissionsRepository`] and asks it once for typed records; caching
//! policy, spreadsheets and files stay on the far side of this trait.

use crate::domain::{EmissionRecord, PoolMembership};
use crate::error::Result;

/// Loads the emissions and membership tables as typed records.
///
/// Implementations coerce malformed cells at this boundary so that every
/// record handed to the core is already numeric.
pub trait EmissionsRepository {
    /// Loads one [`EmissionRecord`] per emissions-table row.
    ///
    /// Rows may repeat a month; the schedule sums them.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::DataIntegrity`](crate::error::SimError::DataIntegrity) if the table has no month
    /// column, or an I/O / parse error from the underlying source.
    fn load_emissions(&self) -> Result<Vec<EmissionRecord>>;

    /// Loads the pool membership table.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::DataIntegrity`](crate::error::SimError::DataIntegrity) if the pool-name column is
    /// missing, or an I/O / parse error from the underlying source.
    fn load_membership(&self) -> Result<PoolMembership>;
}

//! Partition of emission pools by membership flag.

use std::collections::BTreeSet;

use crate::domain::{PoolMembership, PoolSets};

/// Builds [`PoolSets`] from a membership table.
///
/// Flags were resolved at ingestion with exact `"TRUE"` matching; pools
/// absent from the table end up in neither set.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoolClassifier;

impl PoolClassifier {
    /// Classifies every row of `membership`.
    #[must_use]
    pub fn classify(membership: &PoolMembership) -> PoolSets {
        let mut circulation = BTreeSet::new();
        let mut investor = BTreeSet::new();
        for row in membership.rows() {
            if row.circulation() {
                circulation.insert(row.pool_name().to_owned());
            }
            if row.is_investor() {
                investor.insert(row.pool_name().to_owned());
            }
        }
        tracing::debug!(
            circulation = circulation.len(),
            investor = investor.len(),
            "classified pools"
        );
        PoolSets::new(circulation, investor)
    }
}

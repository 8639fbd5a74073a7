//! Raw record tables and their conversion to typed records.
//!
//! Both tables use the shape of a spreadsheet "all records" export: a list
//! of objects mapping column header to cell.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::cell::{coerce_amount, Cell};
use crate::domain::{EmissionRecord, MembershipRow, Month, PoolMembership};
use crate::error::{Result, SimError};

/// Accepted headers for the emissions month column (case-insensitive).
const MONTH_HEADERS: [&str; 2] = ["month", "months"];

/// Membership column holding the pool name.
pub const POOL_NAME_COLUMN: &str = "data_input";

/// Membership column flagging circulating pools.
pub const CIRCULATION_COLUMN: &str = "circulation";

/// Membership column flagging investor pools.
pub const INVESTOR_COLUMN: &str = "is_investor";

/// Membership column holding the pool's share of max supply.
pub const ALLOCATION_COLUMN: &str = "allocation";

/// One raw table row.
pub type Row = BTreeMap<String, Cell>;

fn is_month_header(header: &str) -> bool {
    MONTH_HEADERS
        .iter()
        .any(|h| header.eq_ignore_ascii_case(h))
}

/// Emissions table: one row per month, one column per pool plus a month
/// column.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmissionsTable {
    rows: Vec<Row>,
}

impl EmissionsTable {
    /// Wraps raw rows.
    #[must_use]
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Returns the raw rows.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Converts every row with a parsable month into an [`EmissionRecord`].
    ///
    /// Rows whose month is missing, not a non-negative integer or later
    /// than [`Month::MAX_SCHEDULE`] are dropped with a warning; negative or
    /// non-numeric amounts become `0.0`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::DataIntegrity`] if the table has rows but none of
    /// them carries a month column.
    pub fn to_records(&self) -> Result<Vec<EmissionRecord>> {
        if !self.rows.is_empty() && !self.rows.iter().any(|r| r.keys().any(|k| is_month_header(k))) {
            return Err(SimError::DataIntegrity(
                "emissions table has no `Month` column".to_owned(),
            ));
        }

        let mut records = Vec::with_capacity(self.rows.len());
        for (index, row) in self.rows.iter().enumerate() {
            let month = row
                .iter()
                .find(|(k, _)| is_month_header(k))
                .and_then(|(_, cell)| cell.as_month());
            let Some(month) = month else {
                tracing::warn!(row = index, "emissions row without a valid month, dropped");
                continue;
            };

            let mut record = EmissionRecord::new(Month::new(month));
            for (pool, cell) in row.iter().filter(|(k, _)| !is_month_header(k)) {
                record.add(pool.as_str(), coerce_amount(cell, pool, month));
            }
            records.push(record);
        }
        Ok(records)
    }
}

/// Membership table: one row per pool with its flags.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MembershipTable {
    rows: Vec<Row>,
}

impl MembershipTable {
    /// Wraps raw rows.
    #[must_use]
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Returns the raw rows.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Converts the table into typed [`PoolMembership`].
    ///
    /// Flags are set only by the exact text `"TRUE"`.  Rows without a pool
    /// name are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::DataIntegrity`] if the table has rows but no
    /// `data_input` column.
    pub fn to_membership(&self) -> Result<PoolMembership> {
        if !self.rows.is_empty() && !self.rows.iter().any(|r| r.contains_key(POOL_NAME_COLUMN)) {
            return Err(SimError::DataIntegrity(format!(
                "membership table has no `{POOL_NAME_COLUMN}` column"
            )));
        }

        let flag = |row: &Row, column: &str| row.get(column).is_some_and(Cell::is_true_literal);

        let mut rows = Vec::with_capacity(self.rows.len());
        for (index, row) in self.rows.iter().enumerate() {
            let Some(name) = row
                .get(POOL_NAME_COLUMN)
                .and_then(Cell::as_text)
                .map(str::trim)
                .filter(|s| !s.is_empty())
            else {
                tracing::warn!(row = index, "membership row without a pool name, skipped");
                continue;
            };

            let mut parsed = MembershipRow::new(
                name,
                flag(row, CIRCULATION_COLUMN),
                flag(row, INVESTOR_COLUMN),
            );
            if let Some(cell) = row.get(ALLOCATION_COLUMN) {
                match cell.as_fraction() {
                    Some(fraction) => parsed = parsed.with_allocation(fraction),
                    None if *cell == Cell::Empty => {}
                    None => tracing::warn!(pool = name, ?cell, "non-numeric allocation ignored"),
                }
            }
            rows.push(parsed);
        }
        Ok(PoolMembership::new(rows))
    }
}

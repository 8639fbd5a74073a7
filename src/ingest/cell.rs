//! Spreadsheet cell values and the one place they are coerced.
//!
//! Spreadsheet exports mix numbers, numeric strings ("1,250,000"), boolean
//! flags spelled as strings and blanks.  Every conversion from a [`Cell`]
//! to a typed value in the crate goes through the functions below.

use serde::{Deserialize, Serialize};

use crate::domain::Month;

/// Literal that marks a membership flag as set.
pub const TRUE_LITERAL: &str = "TRUE";

/// A raw table cell as it arrives from the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// A numeric cell.
    Number(f64),
    /// A boolean cell.
    Bool(bool),
    /// A text cell, possibly numeric-looking.
    Text(String),
    /// A blank cell.
    Empty,
}

impl Cell {
    /// Parses the cell as a number.
    ///
    /// Accepts finite numbers and text holding a number with optional
    /// surrounding whitespace and `,` thousands separators.  Returns `None`
    /// for anything else.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) if v.is_finite() => Some(*v),
            Self::Text(s) => {
                let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
                cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
            }
            _ => None,
        }
    }

    /// Parses the cell as a fraction; text ending in `%` is divided by 100.
    #[must_use]
    pub fn as_fraction(&self) -> Option<f64> {
        if let Self::Text(s) = self {
            if let Some(pct) = s.trim().strip_suffix('%') {
                return Self::Text(pct.to_owned()).as_number().map(|v| v / 100.0);
            }
        }
        self.as_number()
    }

    /// Parses the cell as a month number: a non-negative integer, possibly
    /// written as `3.0`, no later than [`Month::MAX_SCHEDULE`].
    #[must_use]
    pub fn as_month(&self) -> Option<u32> {
        let v = self.as_number()?;
        if v < 0.0 || v.fract() != 0.0 || v > f64::from(Month::MAX_SCHEDULE.get()) {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let m = v as u32;
        Some(m)
    }

    /// `true` only for the exact text `"TRUE"`.
    ///
    /// Lower-case spellings, `"1"` and native booleans do not count.
    #[must_use]
    pub fn is_true_literal(&self) -> bool {
        matches!(self, Self::Text(s) if s == TRUE_LITERAL)
    }

    /// Returns the cell as text if it is a text cell.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Coerces an emission amount, logging and substituting `0.0` when the
/// cell is not a non-negative number.
pub(crate) fn coerce_amount(cell: &Cell, pool: &str, month: u32) -> f64 {
    match cell.as_number() {
        Some(v) if v >= 0.0 => v,
        None if matches!(cell, Cell::Empty) => 0.0,
        Some(_) => {
            tracing::warn!(pool, month, ?cell, "negative emission cell, using 0");
            0.0
        }
        None => {
            tracing::warn!(pool, month, ?cell, "non-numeric emission cell, using 0");
            0.0
        }
    }
}

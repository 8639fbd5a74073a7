//! Direction of a one-shot price-impact trade.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Side of a price-impact trade against the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
    /// Tokens are sold into the pool; the change amount is a token count.
    Sold,
    /// Tokens are bought out of the pool; the change amount is a
    /// percentage of the token reserve.
    Bought,
}

impl FromStr for TradeAction {
    type Err = SimError;

    /// Parses `"sold"` or `"bought"`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidAction`] for anything else.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sold" => Ok(Self::Sold),
            "bought" => Ok(Self::Bought),
            other => Err(SimError::InvalidAction(other.to_owned())),
        }
    }
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sold => write!(f, "sold"),
            Self::Bought => write!(f, "bought"),
        }
    }
}

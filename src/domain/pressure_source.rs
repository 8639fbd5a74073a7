//! Which emission pools feed the selling-pressure schedule.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Selection of pools whose unlocks are assumed to be sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PressureSource {
    /// Pools flagged `circulation` in the membership table.
    #[default]
    Circulation,
    /// Pools flagged `is_investor` in the membership table.
    Investors,
    /// Every pool present in the emissions table.
    All,
}

impl fmt::Display for PressureSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Circulation => write!(f, "Circulation"),
            Self::Investors => write!(f, "Investors"),
            Self::All => write!(f, "All"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_circulation() {
        assert_eq!(PressureSource::default(), PressureSource::Circulation);
    }

    #[test]
    fn display() {
        assert_eq!(PressureSource::Investors.to_string(), "Investors");
    }
}

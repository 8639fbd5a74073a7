//! Month index relative to the token generation event.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Month offset from TGE; month `0` is the launch itself.
///
/// Schedules are indexed by `Month`.  Lookups that may fall before TGE
/// (e.g. "the month before the selected one") take a signed `i64` and go
/// through [`Month::from_signed`], which yields `None` for negative input.
///
/// # Examples
///
/// ```
/// use unlock_impact::domain::Month;
///
/// assert_eq!(Month::TGE.to_string(), "TGE");
/// assert_eq!(Month::new(3).to_string(), "Month 3");
/// assert_eq!(Month::from_signed(-1), None);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Month(u32);

impl Month {
    /// The token generation event.
    pub const TGE: Self = Self(0);

    /// Last month an emission schedule may cover: fifty years after TGE.
    ///
    /// Schedules are dense from TGE, so this bounds their length.
    pub const MAX_SCHEDULE: Self = Self(600);

    /// Creates a new `Month`.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Converts a signed month offset, returning `None` before TGE or
    /// beyond `u32::MAX`.
    #[must_use]
    pub fn from_signed(value: i64) -> Option<Self> {
        u32::try_from(value).ok().map(Self)
    }

    /// Returns the underlying month number.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns `true` for month `0`.
    #[must_use]
    pub const fn is_tge(&self) -> bool {
        self.0 == 0
    }

    /// The month before this one, `None` at TGE.
    #[must_use]
    pub const fn previous(&self) -> Option<Self> {
        match self.0.checked_sub(1) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// The month after this one, `None` on overflow.
    #[must_use]
    pub const fn next(&self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Returns the month number as a `usize` index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for Month {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_tge() {
            write!(f, "TGE")
        } else {
            write!(f, "Month {}", self.0)
        }
    }
}

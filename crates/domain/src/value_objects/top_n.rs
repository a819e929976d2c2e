//! Top-N count value object

use std::fmt;

use serde::Serialize;

use crate::errors::DomainError;

/// Number of ranked rows to return per metric (always at least 1)
///
/// No upper bound; HTTP callers are capped at the API edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TopN(u32);

impl TopN {
    /// Create a validated count
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTopN` when `n` is zero or negative, or
    /// does not fit in a `u32`.
    pub fn new(n: i64) -> Result<Self, DomainError> {
        if n < 1 {
            return Err(DomainError::InvalidTopN(n));
        }
        u32::try_from(n)
            .map(Self)
            .map_err(|_| DomainError::InvalidTopN(n))
    }

    /// Get the count
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TopN {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for TopN {
    type Error = DomainError;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        Self::new(i64::from(n))
    }
}

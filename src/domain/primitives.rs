//! Domain primitives: row identifiers.

use serde::{Deserialize, Serialize};

/// Primary key of a row in the `countries` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryId(pub i64);

impl CountryId {
    /// Create a CountryId from a raw rowid.
    pub fn new(id: i64) -> Self {
        CountryId(id)
    }

    /// Get the underlying rowid.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for CountryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Primary key of a row in the `matches` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub i64);

impl MatchId {
    /// Create a MatchId from a raw rowid.
    pub fn new(id: i64) -> Self {
        MatchId(id)
    }

    /// Get the underlying rowid.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

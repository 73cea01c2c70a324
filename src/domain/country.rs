//! Participating team/nation.

use crate::domain::CountryId;
use serde::{Deserialize, Serialize};

/// A row of the `countries` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: CountryId,
    pub name: String,
    /// Competition group label (e.g. "A").
    pub group: String,
    /// Short FIFA identifier (e.g. "ARG").
    pub fifa_code: String,
}

/// A team definition as read from a teams file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub name: String,
    pub group: String,
    pub code: String,
}

impl TeamRecord {
    pub fn new(name: impl Into<String>, group: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: group.into(),
            code: code.into(),
        }
    }
}

/// Stand-in teams seeded ahead of every teams file.
///
/// Knockout fixtures can name `<A>`/`<B>` until the qualifiers are known.
pub fn placeholder_teams() -> [TeamRecord; 2] {
    [
        TeamRecord::new("Team A", "", "<A>"),
        TeamRecord::new("Team B", "", "<B>"),
    ]
}

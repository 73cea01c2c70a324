//! Squad members.

use crate::domain::CountryId;
use serde::{Deserialize, Serialize};

/// Shirt number stored when none is known.
pub const UNKNOWN_NUMBER: i64 = -1;

/// A row of the `players` table.
///
/// The stat columns are never written by the loader and keep their
/// schema defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: i64,
    pub country: Option<CountryId>,
    pub name: String,
    pub position: String,
    pub number: i64,
    pub goals: i64,
    pub yellow: i64,
    pub red: i64,
    pub saves: i64,
}

/// A player definition as read from a players file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub position: String,
    #[serde(default)]
    pub number: Option<i64>,
    /// Team name or FIFA code.
    #[serde(default)]
    pub country: Option<String>,
}

/// A player ready to insert, with its country resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlayer {
    pub country: Option<CountryId>,
    pub name: String,
    pub position: String,
    pub number: i64,
}

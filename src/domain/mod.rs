//! Domain types for tournament seeding.
//!
//! This module provides:
//! - Row types for the three tables: Country, Match, Player
//! - Record types as read from the YAML input files
//! - Match date parsing and stage classification

pub mod country;
pub mod fixture;
pub mod player;
pub mod primitives;
pub mod stage;

pub use country::{placeholder_teams, Country, TeamRecord};
pub use fixture::{parse_match_when, Match, MatchRecord, NewMatch, RecordError};
pub use player::{NewPlayer, Player, PlayerRecord, UNKNOWN_NUMBER};
pub use primitives::{CountryId, MatchId};
pub use stage::Stage;

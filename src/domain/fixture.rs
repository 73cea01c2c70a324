//! Scheduled matches and the date format used by match files.

use crate::domain::{CountryId, MatchId, Stage};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Day-abbreviated month-two digit year, e.g. `01-Jan-24`.
pub const MATCH_DATE_FORMAT: &str = "%d-%b-%y";
/// Optional kickoff time, e.g. `18:30`.
pub const MATCH_TIME_FORMAT: &str = "%H:%M";

/// A row of the `matches` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    /// Matchday number; 0 until assigned, -1 for knockout rounds.
    pub day: i64,
    pub played: bool,
    pub a: CountryId,
    pub b: CountryId,
    /// Group label or stage name, stored verbatim.
    pub stage: String,
    pub when: NaiveDateTime,
    pub assigned: bool,
}

impl Match {
    pub fn stage_kind(&self) -> Stage {
        Stage::classify(&self.stage)
    }
}

/// A match whose teams have been resolved to country rows, ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMatch {
    pub a: CountryId,
    pub b: CountryId,
    pub stage: String,
    pub when: NaiveDateTime,
}

/// A match definition as read from a matches file.
///
/// `a` and `b` reference teams by name or FIFA code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub a: String,
    pub b: String,
    pub stage: String,
    pub when: NaiveDateTime,
}

/// Error produced when a record's fields cannot be interpreted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("could not parse date `{0}` (expected e.g. 01-Jan-24)")]
    InvalidDate(String),
    #[error("could not parse time `{0}` (expected HH:MM)")]
    InvalidTime(String),
    #[error("field `{0}` must not be empty")]
    EmptyField(&'static str),
}

/// Parse a match date and optional kickoff time into a timestamp.
///
/// A missing time means midnight.
pub fn parse_match_when(date: &str, time: Option<&str>) -> Result<NaiveDateTime, RecordError> {
    let day = NaiveDate::parse_from_str(date.trim(), MATCH_DATE_FORMAT)
        .map_err(|_| RecordError::InvalidDate(date.to_string()))?;

    let kickoff = match time.map(str::trim).filter(|t| !t.is_empty()) {
        Some(t) => NaiveTime::parse_from_str(t, MATCH_TIME_FORMAT)
            .map_err(|_| RecordError::InvalidTime(t.to_string()))?,
        None => NaiveTime::MIN,
    };

    Ok(day.and_time(kickoff))
}

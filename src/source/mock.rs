//! In-memory fixture source for tests.

use super::{FixtureSource, SourceError};
use crate::domain::{MatchRecord, PlayerRecord, TeamRecord};
use async_trait::async_trait;

/// Fixture source that returns predefined records.
#[derive(Debug, Clone, Default)]
pub struct MockSource {
    teams: Option<Vec<TeamRecord>>,
    matches: Option<Vec<MatchRecord>>,
    players: Option<Vec<PlayerRecord>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_teams(mut self, teams: Vec<TeamRecord>) -> Self {
        self.teams = Some(teams);
        self
    }

    pub fn with_matches(mut self, matches: Vec<MatchRecord>) -> Self {
        self.matches = Some(matches);
        self
    }

    pub fn with_players(mut self, players: Vec<PlayerRecord>) -> Self {
        self.players = Some(players);
        self
    }
}

#[async_trait]
impl FixtureSource for MockSource {
    async fn teams(&self) -> Result<Option<Vec<TeamRecord>>, SourceError> {
        Ok(self.teams.clone())
    }

    async fn matches(&self) -> Result<Option<Vec<MatchRecord>>, SourceError> {
        Ok(self.matches.clone())
    }

    async fn players(&self) -> Result<Option<Vec<PlayerRecord>>, SourceError> {
        Ok(self.players.clone())
    }
}

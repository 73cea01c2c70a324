//! YAML file source.
//!
//! Every file is a sequence of mappings:
//!
//! ```yaml
//! # teams
//! - { name: Argentina, group: C, code: ARG }
//! # matches (`group` or `stage`, `stage` wins if both are given; `time` is optional)
//! - { a: Argentina, b: KSA, date: 22-Nov-22, group: C, time: "10:00" }
//! # players
//! - { name: Lionel Messi, country: ARG, position: FW, number: 10 }
//! ```

use super::{FixtureSource, SourceError};
use crate::domain::{parse_match_when, MatchRecord, PlayerRecord, RecordError, TeamRecord};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Seed records read from YAML files on disk.
#[derive(Debug, Clone, Default)]
pub struct YamlFiles {
    teams: Option<PathBuf>,
    matches: Option<PathBuf>,
    players: Option<PathBuf>,
}

impl YamlFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_teams(mut self, path: impl Into<PathBuf>) -> Self {
        self.teams = Some(path.into());
        self
    }

    pub fn with_matches(mut self, path: impl Into<PathBuf>) -> Self {
        self.matches = Some(path.into());
        self
    }

    pub fn with_players(mut self, path: impl Into<PathBuf>) -> Self {
        self.players = Some(path.into());
        self
    }
}

#[async_trait]
impl FixtureSource for YamlFiles {
    async fn teams(&self) -> Result<Option<Vec<TeamRecord>>, SourceError> {
        match &self.teams {
            Some(path) => {
                let content = read(path).await?;
                parse_teams(path, &content).map(Some)
            }
            None => Ok(None),
        }
    }

    async fn matches(&self) -> Result<Option<Vec<MatchRecord>>, SourceError> {
        match &self.matches {
            Some(path) => {
                let content = read(path).await?;
                parse_matches(path, &content).map(Some)
            }
            None => Ok(None),
        }
    }

    async fn players(&self) -> Result<Option<Vec<PlayerRecord>>, SourceError> {
        match &self.players {
            Some(path) => {
                let content = read(path).await?;
                parse_players(path, &content).map(Some)
            }
            None => Ok(None),
        }
    }
}

async fn read(path: &Path) -> Result<String, SourceError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), bytes = content.len(), "Read seed file");
    Ok(content)
}

fn parse_sequence<T: DeserializeOwned>(path: &Path, content: &str) -> Result<Vec<T>, SourceError> {
    // An empty document is an empty list, not a parse error.
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let items: Option<Vec<T>> =
        serde_yaml::from_str(content).map_err(|source| SourceError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(items.unwrap_or_default())
}

fn invalid(path: &Path, index: usize, source: RecordError) -> SourceError {
    SourceError::InvalidRecord {
        path: path.to_path_buf(),
        index,
        source,
    }
}

fn require(value: &str, field: &'static str) -> Result<(), RecordError> {
    if value.trim().is_empty() {
        Err(RecordError::EmptyField(field))
    } else {
        Ok(())
    }
}

pub fn parse_teams(path: &Path, content: &str) -> Result<Vec<TeamRecord>, SourceError> {
    let teams: Vec<TeamRecord> = parse_sequence(path, content)?;
    for (index, team) in teams.iter().enumerate() {
        require(&team.name, "name").map_err(|e| invalid(path, index, e))?;
        require(&team.code, "code").map_err(|e| invalid(path, index, e))?;
    }
    Ok(teams)
}

#[derive(Debug, Deserialize)]
struct RawMatch {
    a: String,
    b: String,
    date: String,
    #[serde(default)]
    group: Option<String>,
    #[serde(default)]
    stage: Option<String>,
    #[serde(default)]
    time: Option<String>,
}

impl RawMatch {
    /// `stage` wins when both labels are present.
    fn label(&mut self) -> Result<String, RecordError> {
        self.stage
            .take()
            .or_else(|| self.group.take())
            .ok_or(RecordError::EmptyField("group"))
    }
}

pub fn parse_matches(path: &Path, content: &str) -> Result<Vec<MatchRecord>, SourceError> {
    let raw: Vec<RawMatch> = parse_sequence(path, content)?;
    raw.into_iter()
        .enumerate()
        .map(|(index, mut m)| {
            require(&m.a, "a").map_err(|e| invalid(path, index, e))?;
            require(&m.b, "b").map_err(|e| invalid(path, index, e))?;
            let stage = m.label().map_err(|e| invalid(path, index, e))?;
            let when =
                parse_match_when(&m.date, m.time.as_deref()).map_err(|e| invalid(path, index, e))?;
            Ok(MatchRecord {
                a: m.a,
                b: m.b,
                stage,
                when,
            })
        })
        .collect()
}

pub fn parse_players(path: &Path, content: &str) -> Result<Vec<PlayerRecord>, SourceError> {
    let players: Vec<PlayerRecord> = parse_sequence(path, content)?;
    for (index, player) in players.iter().enumerate() {
        require(&player.name, "name").map_err(|e| invalid(path, index, e))?;
    }
    Ok(players)
}

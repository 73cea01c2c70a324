//! Fixture source abstraction for reading team, match, and player definitions.

use crate::domain::{MatchRecord, PlayerRecord, RecordError, TeamRecord};
use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub mod mock;
pub mod yaml;

pub use mock::MockSource;
pub use yaml::YamlFiles;

/// Source of seed records.
///
/// Each method returns `None` when the source has no input of that kind,
/// which is distinct from an input that is present but empty.
#[async_trait]
pub trait FixtureSource: Send + Sync + fmt::Debug {
    /// Team definitions, in file order.
    async fn teams(&self) -> Result<Option<Vec<TeamRecord>>, SourceError>;

    /// Match definitions, in file order, with dates already parsed.
    async fn matches(&self) -> Result<Option<Vec<MatchRecord>>, SourceError>;

    /// Player definitions, in file order.
    async fn players(&self) -> Result<Option<Vec<PlayerRecord>>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse yaml file {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid record #{index} in {path}: {source}")]
    InvalidRecord {
        path: PathBuf,
        index: usize,
        #[source]
        source: RecordError,
    },
}

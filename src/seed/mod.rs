//! Seeding routine: teams, then matches, then players, then match days.
//!
//! Each phase reads its input from a [`FixtureSource`] and writes through
//! the [`Repository`] in its own transaction. A failing phase aborts the run
//! and leaves the rows of earlier phases in place.

pub mod lookup;

pub use lookup::CountryLookup;

use crate::config::{Config, KeyMode, PlayerMode};
use crate::db::{init_db, reset_schema, Outcome, Repository, Seeded};
use crate::domain::{
    placeholder_teams, Country, MatchRecord, NewMatch, NewPlayer, PlayerRecord, TeamRecord,
    UNKNOWN_NUMBER,
};
use crate::source::{FixtureSource, SourceError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Db(#[from] sqlx::Error),
    #[error("match #{index} references unknown team `{team}`")]
    UnknownTeam { index: usize, team: String },
    #[error("player `{player}` references unknown country `{country}`")]
    UnknownCountry { player: String, country: String },
    #[error("cannot import match data when there are no countries in the table")]
    NoCountries,
}

/// Behaviour switches for a seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedOptions {
    pub key_mode: KeyMode,
    pub player_mode: PlayerMode,
    pub assign_days: bool,
}

impl Default for SeedOptions {
    fn default() -> Self {
        SeedOptions::from(&Config::default())
    }
}

impl From<&Config> for SeedOptions {
    fn from(config: &Config) -> Self {
        SeedOptions {
            key_mode: config.key_mode,
            player_mode: config.player_mode,
            assign_days: config.assign_days,
        }
    }
}

/// Get-or-create outcomes for one phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseCounts {
    pub created: usize,
    pub existing: usize,
    pub updated: usize,
}

impl PhaseCounts {
    fn tally<T>(seeded: &[Seeded<T>]) -> Self {
        let mut counts = PhaseCounts::default();
        for s in seeded {
            match s.outcome {
                Outcome::Created => counts.created += 1,
                Outcome::Existing => counts.existing += 1,
                Outcome::Updated => counts.updated += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.created + self.existing + self.updated
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub countries: PhaseCounts,
    pub matches: PhaseCounts,
    pub players: PhaseCounts,
    /// Player records parsed but not written because ingestion is disabled.
    pub players_skipped: usize,
    /// Matches visited by match day numbering.
    pub days_assigned: usize,
}

pub struct Seeder {
    source: Arc<dyn FixtureSource>,
    repo: Arc<Repository>,
    options: SeedOptions,
}

impl Seeder {
    pub fn new(source: Arc<dyn FixtureSource>, repo: Arc<Repository>, options: SeedOptions) -> Self {
        Self {
            source,
            repo,
            options,
        }
    }

    /// Run every phase the source has input for.
    pub async fn run(&self) -> Result<SeedSummary, SeedError> {
        let mut summary = SeedSummary::default();

        let mut touched = Vec::new();
        if let Some(teams) = self.source.teams().await? {
            let (seeded, counts) = self.seed_teams(&teams).await?;
            summary.countries = counts;
            touched = seeded.into_iter().map(|s| s.row).collect();
        }

        let lookup = self.build_lookup(touched).await?;

        if let Some(matches) = self.source.matches().await? {
            summary.matches = self.seed_matches(&matches, &lookup).await?;
        }

        if let Some(players) = self.source.players().await? {
            match self.options.player_mode {
                PlayerMode::Skip => {
                    warn!(
                        "Player ingestion is disabled; parsed {} players, none written",
                        players.len()
                    );
                    summary.players_skipped = players.len();
                }
                PlayerMode::Load => {
                    summary.players = self.seed_players(&players, &lookup).await?;
                }
            }
        }

        if self.options.assign_days {
            summary.days_assigned = self.repo.assign_match_days().await?;
        }

        Ok(summary)
    }

    /// Seed the placeholder teams followed by `teams`.
    ///
    /// The returned counts cover `teams` only.
    async fn seed_teams(
        &self,
        teams: &[TeamRecord],
    ) -> Result<(Vec<Seeded<Country>>, PhaseCounts), SeedError> {
        let placeholders = placeholder_teams();
        let records: Vec<TeamRecord> = placeholders.iter().chain(teams).cloned().collect();

        let seeded = self
            .repo
            .seed_countries(&records, self.options.key_mode)
            .await?;
        let counts = PhaseCounts::tally(&seeded[placeholders.len()..]);
        info!(
            existing = counts.existing,
            updated = counts.updated,
            "Added {} (+{}) countries to the database",
            counts.created,
            placeholders.len()
        );
        Ok((seeded, counts))
    }

    /// Stored countries, oldest first, overlaid with the rows from this run.
    async fn build_lookup(&self, touched: Vec<Country>) -> Result<CountryLookup, SeedError> {
        let mut lookup = CountryLookup::from_countries(self.repo.list_countries().await?);
        lookup.extend(touched);
        info!("Loaded {} countries into the lookup", lookup.len());
        Ok(lookup)
    }

    async fn seed_matches(
        &self,
        records: &[MatchRecord],
        lookup: &CountryLookup,
    ) -> Result<PhaseCounts, SeedError> {
        if records.is_empty() {
            return Ok(PhaseCounts::default());
        }
        if lookup.is_empty() {
            return Err(SeedError::NoCountries);
        }

        let resolve = |index: usize, team: &str| {
            lookup
                .resolve(team)
                .map(|c| c.id)
                .ok_or_else(|| SeedError::UnknownTeam {
                    index,
                    team: team.to_string(),
                })
        };

        let resolved = records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                Ok(NewMatch {
                    a: resolve(index, &record.a)?,
                    b: resolve(index, &record.b)?,
                    stage: record.stage.clone(),
                    when: record.when,
                })
            })
            .collect::<Result<Vec<_>, SeedError>>()?;

        let seeded = self
            .repo
            .seed_matches(&resolved, self.options.key_mode)
            .await?;
        let counts = PhaseCounts::tally(&seeded);
        info!(
            existing = counts.existing,
            updated = counts.updated,
            "Added {} matches to the database",
            counts.created
        );
        Ok(counts)
    }

    async fn seed_players(
        &self,
        records: &[PlayerRecord],
        lookup: &CountryLookup,
    ) -> Result<PhaseCounts, SeedError> {
        let resolved = records
            .iter()
            .map(|record| {
                let country = match &record.country {
                    Some(key) => Some(lookup.resolve(key).map(|c| c.id).ok_or_else(|| {
                        SeedError::UnknownCountry {
                            player: record.name.clone(),
                            country: key.clone(),
                        }
                    })?),
                    None => None,
                };
                Ok(NewPlayer {
                    country,
                    name: record.name.clone(),
                    position: record.position.clone(),
                    number: record.number.unwrap_or(UNKNOWN_NUMBER),
                })
            })
            .collect::<Result<Vec<_>, SeedError>>()?;

        let seeded = self.repo.seed_players(&resolved).await?;
        let counts = PhaseCounts::tally(&seeded);
        info!(existing = counts.existing, "Added {} players to the database", counts.created);
        Ok(counts)
    }
}

/// Open `config.database_path`, optionally purge it, and run a full seed.
pub async fn seed_database(
    config: &Config,
    source: Arc<dyn FixtureSource>,
    purge: bool,
) -> Result<SeedSummary, SeedError> {
    let pool = init_db(&config.database_path).await?;
    if purge {
        reset_schema(&pool).await?;
    }

    let repo = Arc::new(Repository::new(pool.clone()));
    let result = Seeder::new(source, repo, SeedOptions::from(config)).run().await;

    pool.close().await;
    result
}

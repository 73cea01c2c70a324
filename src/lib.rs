pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod report;
pub mod seed;
pub mod source;

pub use config::{Config, KeyMode, PlayerMode};
pub use db::{init_db, Repository};
pub use domain::{Country, CountryId, Match, MatchId, Player, Stage};
pub use error::AppError;
pub use report::{build_report, inspect_database, OutputFormat, ReportKind};
pub use seed::{seed_database, SeedOptions, SeedSummary, Seeder};
pub use source::{FixtureSource, MockSource, YamlFiles};

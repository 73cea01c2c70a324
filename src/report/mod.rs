//! Named read-only reports over a seeded database.
//!
//! Each report is a small table of JSON values that can be rendered as an
//! aligned text table, a JSON array of objects, or CSV.

mod render;

use crate::db::{open_read_only, DbLocation, Repository};
use crate::domain::CountryId;
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportKind {
    /// Row counts per table
    Summary,
    /// Every country with its group and code
    Countries,
    /// Teams per group
    Groups,
    /// Every match with resolved team names
    Matches,
    /// Every player with its country
    Players,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("database {0} does not exist")]
    MissingDatabase(PathBuf),
    #[error(transparent)]
    Db(#[from] sqlx::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("could not encode report: {0}")]
    Encoding(String),
}

/// A rendered-agnostic report: column headers plus rows of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<Value>>,
}

impl Report {
    pub fn render(&self, format: OutputFormat) -> Result<String, ReportError> {
        match format {
            OutputFormat::Table => Ok(render::table(self)),
            OutputFormat::Json => render::json(self),
            OutputFormat::Csv => render::csv(self),
        }
    }
}

/// Build one named report from the repository.
pub async fn build_report(repo: &Repository, kind: ReportKind) -> Result<Report, ReportError> {
    match kind {
        ReportKind::Summary => summary(repo).await,
        ReportKind::Countries => countries(repo).await,
        ReportKind::Groups => groups(repo).await,
        ReportKind::Matches => matches(repo).await,
        ReportKind::Players => players(repo).await,
    }
}

/// Open an existing database read-only and render one report.
pub async fn inspect_database(
    db_path: &str,
    kind: ReportKind,
    format: OutputFormat,
) -> Result<String, ReportError> {
    let path = match DbLocation::resolve(db_path) {
        DbLocation::File(path) if path.is_file() => path,
        DbLocation::File(path) => return Err(ReportError::MissingDatabase(path)),
        DbLocation::Memory => return Err(ReportError::MissingDatabase(PathBuf::from(db_path))),
    };

    let pool = open_read_only(&path).await?;
    let repo = Repository::new(pool.clone());
    let report = build_report(&repo, kind).await;
    pool.close().await;

    report?.render(format)
}

async fn summary(repo: &Repository) -> Result<Report, ReportError> {
    let counts = repo.count_rows().await?;
    Ok(Report {
        headers: vec!["table", "rows"],
        rows: vec![
            vec![json!("countries"), json!(counts.countries)],
            vec![json!("matches"), json!(counts.matches)],
            vec![json!("players"), json!(counts.players)],
        ],
    })
}

async fn countries(repo: &Repository) -> Result<Report, ReportError> {
    let mut countries = repo.list_countries().await?;
    countries.sort_by(|a, b| a.group.cmp(&b.group).then_with(|| a.name.cmp(&b.name)));

    Ok(Report {
        headers: vec!["id", "name", "group", "code"],
        rows: countries
            .into_iter()
            .map(|c| {
                vec![
                    json!(c.id),
                    json!(c.name),
                    json!(c.group),
                    json!(c.fifa_code),
                ]
            })
            .collect(),
    })
}

async fn groups(repo: &Repository) -> Result<Report, ReportError> {
    let mut by_group: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for country in repo.list_countries().await? {
        by_group.entry(country.group).or_default().push(country.name);
    }

    Ok(Report {
        headers: vec!["group", "teams"],
        rows: by_group
            .into_iter()
            .map(|(group, mut teams)| {
                teams.sort();
                vec![json!(group), json!(teams.join(", "))]
            })
            .collect(),
    })
}

async fn matches(repo: &Repository) -> Result<Report, ReportError> {
    let names: HashMap<CountryId, String> = repo
        .list_countries()
        .await?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();
    let name_of = |id: CountryId| names.get(&id).cloned().unwrap_or_else(|| format!("#{}", id));

    Ok(Report {
        headers: vec!["id", "when", "a", "b", "stage", "day", "played"],
        rows: repo
            .list_matches()
            .await?
            .into_iter()
            .map(|m| {
                vec![
                    json!(m.id),
                    json!(m.when.format("%Y-%m-%d %H:%M").to_string()),
                    json!(name_of(m.a)),
                    json!(name_of(m.b)),
                    json!(m.stage),
                    json!(m.day),
                    json!(m.played),
                ]
            })
            .collect(),
    })
}

async fn players(repo: &Repository) -> Result<Report, ReportError> {
    let names: HashMap<CountryId, String> = repo
        .list_countries()
        .await?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();

    Ok(Report {
        headers: vec!["id", "name", "country", "position", "number"],
        rows: repo
            .list_players()
            .await?
            .into_iter()
            .map(|p| {
                let country = p.country.and_then(|id| names.get(&id).cloned());
                vec![
                    json!(p.id),
                    json!(p.name),
                    json!(country),
                    json!(p.position),
                    json!(p.number),
                ]
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeyMode;
    use crate::db::{init_db, MEMORY_DATABASE};
    use crate::domain::{parse_match_when, NewMatch, NewPlayer, TeamRecord};

    async fn seeded_repo() -> Repository {
        let pool = init_db(MEMORY_DATABASE).await.expect("init_db failed");
        let repo = Repository::new(pool);
        let countries: Vec<_> = repo
            .seed_countries(
                &[
                    TeamRecord::new("Beta", "A", "BET"),
                    TeamRecord::new("Alpha", "A", "ALP"),
                    TeamRecord::new("Gamma", "B", "GAM"),
                ],
                KeyMode::Compound,
            )
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.row)
            .collect();
        repo.seed_matches(
            &[NewMatch {
                a: countries[1].id,
                b: countries[0].id,
                stage: "A".to_string(),
                when: parse_match_when("01-Jan-24", Some("18:00")).unwrap(),
            }],
            KeyMode::Compound,
        )
        .await
        .unwrap();
        repo.seed_players(&[NewPlayer {
            country: Some(countries[2].id),
            name: "Keeper".to_string(),
            position: "GK".to_string(),
            number: 1,
        }])
        .await
        .unwrap();
        repo
    }

    #[tokio::test]
    async fn test_summary_report() {
        let repo = seeded_repo().await;
        let report = build_report(&repo, ReportKind::Summary).await.unwrap();
        assert_eq!(report.headers, vec!["table", "rows"]);
        assert_eq!(report.rows[0], vec![json!("countries"), json!(3)]);
        assert_eq!(report.rows[1], vec![json!("matches"), json!(1)]);
        assert_eq!(report.rows[2], vec![json!("players"), json!(1)]);
    }

    #[tokio::test]
    async fn test_countries_sorted_by_group_then_name() {
        let repo = seeded_repo().await;
        let report = build_report(&repo, ReportKind::Countries).await.unwrap();
        let names: Vec<&Value> = report.rows.iter().map(|r| &r[1]).collect();
        assert_eq!(names, vec![&json!("Alpha"), &json!("Beta"), &json!("Gamma")]);
    }

    #[tokio::test]
    async fn test_groups_report() {
        let repo = seeded_repo().await;
        let report = build_report(&repo, ReportKind::Groups).await.unwrap();
        assert_eq!(
            report.rows,
            vec![
                vec![json!("A"), json!("Alpha, Beta")],
                vec![json!("B"), json!("Gamma")],
            ]
        );
    }

    #[tokio::test]
    async fn test_matches_report_resolves_names() {
        let repo = seeded_repo().await;
        let report = build_report(&repo, ReportKind::Matches).await.unwrap();
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0][1], json!("2024-01-01 18:00"));
        assert_eq!(report.rows[0][2], json!("Alpha"));
        assert_eq!(report.rows[0][3], json!("Beta"));
        assert_eq!(report.rows[0][6], json!(false));
    }

    #[tokio::test]
    async fn test_players_report() {
        let repo = seeded_repo().await;
        let report = build_report(&repo, ReportKind::Players).await.unwrap();
        assert_eq!(report.rows[0][1], json!("Keeper"));
        assert_eq!(report.rows[0][2], json!("Gamma"));
    }

    #[tokio::test]
    async fn test_inspect_missing_database() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.db");

        let err = inspect_database(
            &path.to_string_lossy(),
            ReportKind::Summary,
            OutputFormat::Table,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ReportError::MissingDatabase(_)));
        assert!(!path.exists());
    }
}

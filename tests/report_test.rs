use std::sync::Arc;
use tempfile::TempDir;
use wcseed::domain::{parse_match_when, MatchRecord, TeamRecord};
use wcseed::report::{inspect_database, OutputFormat, ReportError, ReportKind};
use wcseed::seed::seed_database;
use wcseed::{Config, MockSource};

async fn seeded_db() -> (TempDir, String) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir
        .path()
        .join("cup.db")
        .to_string_lossy()
        .to_string();

    let source = MockSource::new()
        .with_teams(vec![
            TeamRecord::new("Argentina", "C", "ARG"),
            TeamRecord::new("Saudi Arabia", "C", "KSA"),
            TeamRecord::new("Denmark", "D", "DEN"),
        ])
        .with_matches(vec![MatchRecord {
            a: "ARG".to_string(),
            b: "KSA".to_string(),
            stage: "C".to_string(),
            when: parse_match_when("22-Nov-22", Some("10:00")).unwrap(),
        }]);
    let config = Config {
        database_path: db_path.clone(),
        ..Config::default()
    };
    seed_database(&config, Arc::new(source), false)
        .await
        .expect("seed failed");

    (temp_dir, db_path)
}

#[tokio::test]
async fn test_summary_table() {
    let (_temp, db) = seeded_db().await;
    let out = inspect_database(&db, ReportKind::Summary, OutputFormat::Table)
        .await
        .unwrap();
    assert_eq!(
        out,
        "table      rows\n---------  ----\ncountries  5\nmatches    1\nplayers    0\n"
    );
}

#[tokio::test]
async fn test_groups_csv() {
    let (_temp, db) = seeded_db().await;
    let out = inspect_database(&db, ReportKind::Groups, OutputFormat::Csv)
        .await
        .unwrap();
    assert_eq!(
        out,
        "group,teams\n,\"Team A, Team B\"\nC,\"Argentina, Saudi Arabia\"\nD,Denmark\n"
    );
}

#[tokio::test]
async fn test_matches_json() {
    let (_temp, db) = seeded_db().await;
    let out = inspect_database(&db, ReportKind::Matches, OutputFormat::Json)
        .await
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    let first = &parsed[0];
    assert_eq!(first["a"], "Argentina");
    assert_eq!(first["b"], "Saudi Arabia");
    assert_eq!(first["when"], "2022-11-22 10:00");
    assert_eq!(first["day"], 0);
}

#[tokio::test]
async fn test_inspect_does_not_write() {
    let (_temp, db) = seeded_db().await;
    let before = std::fs::metadata(&db).unwrap().modified().unwrap();
    inspect_database(&db, ReportKind::Countries, OutputFormat::Table)
        .await
        .unwrap();
    let after = std::fs::metadata(&db).unwrap().modified().unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_inspect_memory_is_missing() {
    let err = inspect_database("memory", ReportKind::Summary, OutputFormat::Table)
        .await
        .unwrap_err();
    assert!(matches!(err, ReportError::MissingDatabase(_)));
}

//! Match operations for the repository.

use crate::config::KeyMode;
use crate::domain::{CountryId, Match, MatchId, NewMatch};
use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::Row;
use std::collections::HashSet;
use tracing::{debug, info};

use super::{Repository, Seeded};

const MATCH_COLUMNS: &str = r#"id, day, played, a_id, b_id, stage, "when", assigned"#;

impl Repository {
    /// Get-or-create one match per resolved fixture, in a single transaction.
    ///
    /// # Errors
    /// Returns an error if any statement fails; nothing from this batch is kept.
    pub async fn seed_matches(
        &self,
        matches: &[NewMatch],
        mode: KeyMode,
    ) -> Result<Vec<Seeded<Match>>, sqlx::Error> {
        let mut seeded = Vec::with_capacity(matches.len());
        let mut tx = self.pool.begin().await?;

        for new_match in matches {
            seeded.push(get_or_create_match(&mut *tx, new_match, mode).await?);
        }

        tx.commit().await?;
        Ok(seeded)
    }

    /// Every match ordered by kickoff, then id.
    pub async fn list_matches(&self) -> Result<Vec<Match>, sqlx::Error> {
        let rows = sqlx::query(&format!(
            r#"SELECT {} FROM matches ORDER BY "when" ASC, id ASC"#,
            MATCH_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(match_from_row).collect())
    }

    /// Matches involving `country` on either side, ordered by kickoff, then id.
    pub async fn matches_for_country(&self, country: CountryId) -> Result<Vec<Match>, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        query_matches_for_country(&mut *conn, country).await
    }

    /// Number every country's group matches 1..n in kickoff order.
    ///
    /// A group match keeps a day it already has (so the first team visited
    /// decides a shared fixture); knockout matches get day -1. Every visited
    /// match is flagged `assigned`. Returns the number of matches visited.
    pub async fn assign_match_days(&self) -> Result<usize, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let country_ids: Vec<i64> = sqlx::query_scalar("SELECT id FROM countries ORDER BY id ASC")
            .fetch_all(&mut *tx)
            .await?;

        let mut visited: HashSet<MatchId> = HashSet::new();
        for country_id in country_ids {
            let matches = query_matches_for_country(&mut *tx, CountryId::new(country_id)).await?;

            let mut group_position = 0i64;
            for m in matches {
                let day = if m.stage_kind().is_knockout() {
                    -1
                } else {
                    group_position += 1;
                    if m.day == 0 {
                        group_position
                    } else {
                        m.day
                    }
                };

                if day != m.day || !m.assigned {
                    sqlx::query("UPDATE matches SET day = ?, assigned = 1 WHERE id = ?")
                        .bind(day)
                        .bind(m.id.as_i64())
                        .execute(&mut *tx)
                        .await?;
                }
                visited.insert(m.id);
            }
        }

        tx.commit().await?;
        info!("Assigned match days to {} matches", visited.len());
        Ok(visited.len())
    }
}

fn match_from_row(row: &SqliteRow) -> Match {
    Match {
        id: MatchId::new(row.get("id")),
        day: row.get("day"),
        played: row.get("played"),
        a: CountryId::new(row.get("a_id")),
        b: CountryId::new(row.get("b_id")),
        stage: row.get("stage"),
        when: row.get("when"),
        assigned: row.get("assigned"),
    }
}

async fn query_matches_for_country(
    conn: &mut SqliteConnection,
    country: CountryId,
) -> Result<Vec<Match>, sqlx::Error> {
    let rows = sqlx::query(&format!(
        r#"SELECT {} FROM matches WHERE a_id = ? OR b_id = ? ORDER BY "when" ASC, id ASC"#,
        MATCH_COLUMNS
    ))
    .bind(country.as_i64())
    .bind(country.as_i64())
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows.iter().map(match_from_row).collect())
}

async fn get_or_create_match(
    conn: &mut SqliteConnection,
    new_match: &NewMatch,
    mode: KeyMode,
) -> Result<Seeded<Match>, sqlx::Error> {
    match mode {
        KeyMode::Compound => {
            // Numbered rows started life at day 0, so they still count as day 0 here.
            let existing = sqlx::query(&format!(
                r#"
                SELECT {}
                FROM matches
                WHERE (day = 0 OR assigned = 1) AND played = 0
                  AND a_id = ? AND b_id = ? AND stage = ? AND "when" = ?
                ORDER BY id ASC
                LIMIT 1
                "#,
                MATCH_COLUMNS
            ))
            .bind(new_match.a.as_i64())
            .bind(new_match.b.as_i64())
            .bind(&new_match.stage)
            .bind(new_match.when)
            .fetch_optional(&mut *conn)
            .await?;

            if let Some(row) = existing {
                debug!(a = %new_match.a, b = %new_match.b, "Match already present");
                return Ok(Seeded::existing(match_from_row(&row)));
            }
        }
        KeyMode::Natural => {
            let existing = sqlx::query(&format!(
                r#"
                SELECT {}
                FROM matches
                WHERE a_id = ? AND b_id = ? AND "when" = ?
                ORDER BY id ASC
                LIMIT 1
                "#,
                MATCH_COLUMNS
            ))
            .bind(new_match.a.as_i64())
            .bind(new_match.b.as_i64())
            .bind(new_match.when)
            .fetch_optional(&mut *conn)
            .await?;

            if let Some(row) = existing {
                let mut found = match_from_row(&row);
                if found.stage == new_match.stage {
                    debug!(a = %new_match.a, b = %new_match.b, "Match already present");
                    return Ok(Seeded::existing(found));
                }

                sqlx::query("UPDATE matches SET stage = ? WHERE id = ?")
                    .bind(&new_match.stage)
                    .bind(found.id.as_i64())
                    .execute(&mut *conn)
                    .await?;

                debug!(id = %found.id, stage = %new_match.stage, "Match stage updated in place");
                found.stage = new_match.stage.clone();
                return Ok(Seeded::updated(found));
            }
        }
    }

    let result = sqlx::query(
        r#"
        INSERT INTO matches (day, played, a_id, b_id, stage, "when", assigned)
        VALUES (0, 0, ?, ?, ?, ?, 0)
        "#,
    )
    .bind(new_match.a.as_i64())
    .bind(new_match.b.as_i64())
    .bind(&new_match.stage)
    .bind(new_match.when)
    .execute(&mut *conn)
    .await?;

    Ok(Seeded::created(Match {
        id: MatchId::new(result.last_insert_rowid()),
        day: 0,
        played: false,
        a: new_match.a,
        b: new_match.b,
        stage: new_match.stage.clone(),
        when: new_match.when,
        assigned: false,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::{init_db, MEMORY_DATABASE};
    use crate::db::repo::Outcome;
    use crate::domain::{Country, TeamRecord};
    use chrono::{NaiveDate, NaiveDateTime};

    async fn setup_repo() -> (Repository, Vec<Country>) {
        let pool = init_db(MEMORY_DATABASE).await.expect("init_db failed");
        let repo = Repository::new(pool);
        let teams = vec![
            TeamRecord::new("Alpha", "A", "ALP"),
            TeamRecord::new("Beta", "A", "BET"),
            TeamRecord::new("Gamma", "A", "GAM"),
        ];
        let countries = repo
            .seed_countries(&teams, KeyMode::Compound)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.row)
            .collect();
        (repo, countries)
    }

    fn at(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn fixture(a: &Country, b: &Country, stage: &str, day: u32) -> NewMatch {
        NewMatch {
            a: a.id,
            b: b.id,
            stage: stage.to_string(),
            when: at(day),
        }
    }

    #[tokio::test]
    async fn test_seed_matches_round_trips_fields() {
        let (repo, c) = setup_repo().await;

        let seeded = repo
            .seed_matches(&[fixture(&c[0], &c[1], "A", 1)], KeyMode::Compound)
            .await
            .unwrap();
        assert_eq!(seeded[0].outcome, Outcome::Created);

        let stored = repo.list_matches().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0], seeded[0].row);
        assert_eq!(stored[0].when, at(1));
        assert_eq!(stored[0].day, 0);
        assert!(!stored[0].played);
    }

    #[tokio::test]
    async fn test_compound_match_key_is_idempotent() {
        let (repo, c) = setup_repo().await;
        let batch = vec![fixture(&c[0], &c[1], "A", 1)];

        repo.seed_matches(&batch, KeyMode::Compound).await.unwrap();
        let second = repo.seed_matches(&batch, KeyMode::Compound).await.unwrap();

        assert_eq!(second[0].outcome, Outcome::Existing);
        assert_eq!(repo.list_matches().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_compound_match_key_duplicates_on_stage_change() {
        let (repo, c) = setup_repo().await;

        repo.seed_matches(&[fixture(&c[0], &c[1], "A", 1)], KeyMode::Compound)
            .await
            .unwrap();
        repo.seed_matches(&[fixture(&c[0], &c[1], "GROUP", 1)], KeyMode::Compound)
            .await
            .unwrap();

        assert_eq!(repo.list_matches().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_natural_match_key_updates_stage() {
        let (repo, c) = setup_repo().await;

        repo.seed_matches(&[fixture(&c[0], &c[1], "A", 1)], KeyMode::Natural)
            .await
            .unwrap();
        let second = repo
            .seed_matches(&[fixture(&c[0], &c[1], "GROUP", 1)], KeyMode::Natural)
            .await
            .unwrap();

        assert_eq!(second[0].outcome, Outcome::Updated);
        let stored = repo.list_matches().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].stage, "GROUP");
    }

    #[tokio::test]
    async fn test_assign_match_days() {
        let (repo, c) = setup_repo().await;
        let batch = vec![
            fixture(&c[0], &c[1], "A", 1),
            fixture(&c[1], &c[2], "A", 5),
            fixture(&c[0], &c[2], "A", 9),
            fixture(&c[0], &c[1], "FINAL", 20),
        ];
        repo.seed_matches(&batch, KeyMode::Compound).await.unwrap();

        let visited = repo.assign_match_days().await.unwrap();
        assert_eq!(visited, 4);

        let stored = repo.list_matches().await.unwrap();
        let days: Vec<i64> = stored.iter().map(|m| m.day).collect();
        // Alpha numbers its matches 1 and 2; Beta then gives Beta-Gamma its second slot.
        assert_eq!(days, vec![1, 2, 2, -1]);
        assert!(stored.iter().all(|m| m.assigned));

        let alpha = repo.matches_for_country(c[0].id).await.unwrap();
        assert_eq!(alpha.len(), 3);
    }

    #[tokio::test]
    async fn test_reseed_after_assignment_is_idempotent() {
        let (repo, c) = setup_repo().await;
        let batch = vec![
            fixture(&c[0], &c[1], "A", 1),
            fixture(&c[0], &c[1], "FINAL", 20),
        ];
        repo.seed_matches(&batch, KeyMode::Compound).await.unwrap();
        repo.assign_match_days().await.unwrap();

        let again = repo.seed_matches(&batch, KeyMode::Compound).await.unwrap();
        assert!(again.iter().all(|s| s.outcome == Outcome::Existing));
        assert_eq!(repo.list_matches().await.unwrap().len(), 2);
    }
}

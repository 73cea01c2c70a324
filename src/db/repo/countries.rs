//! Country operations for the repository.

use crate::config::KeyMode;
use crate::domain::{Country, CountryId, TeamRecord};
use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::Row;
use tracing::debug;

use super::{Repository, Seeded};

impl Repository {
    /// Get-or-create one country per team record, in a single transaction.
    ///
    /// Results are returned in input order.
    ///
    /// # Errors
    /// Returns an error if any statement fails; nothing from this batch is kept.
    pub async fn seed_countries(
        &self,
        teams: &[TeamRecord],
        mode: KeyMode,
    ) -> Result<Vec<Seeded<Country>>, sqlx::Error> {
        let mut seeded = Vec::with_capacity(teams.len());
        let mut tx = self.pool.begin().await?;

        for team in teams {
            seeded.push(get_or_create_country(&mut *tx, team, mode).await?);
        }

        tx.commit().await?;
        Ok(seeded)
    }

    /// Every country, oldest first.
    pub async fn list_countries(&self) -> Result<Vec<Country>, sqlx::Error> {
        let rows = sqlx::query(
            "SELECT id, name, group_name, fifa_code FROM countries ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(country_from_row).collect())
    }
}

fn country_from_row(row: &SqliteRow) -> Country {
    Country {
        id: CountryId::new(row.get("id")),
        name: row.get("name"),
        group: row.get("group_name"),
        fifa_code: row.get("fifa_code"),
    }
}

async fn get_or_create_country(
    conn: &mut SqliteConnection,
    team: &TeamRecord,
    mode: KeyMode,
) -> Result<Seeded<Country>, sqlx::Error> {
    match mode {
        KeyMode::Compound => {
            let existing = sqlx::query(
                r#"
                SELECT id, name, group_name, fifa_code
                FROM countries
                WHERE name = ? AND group_name = ? AND fifa_code = ?
                ORDER BY id ASC
                LIMIT 1
                "#,
            )
            .bind(&team.name)
            .bind(&team.group)
            .bind(&team.code)
            .fetch_optional(&mut *conn)
            .await?;

            if let Some(row) = existing {
                debug!(name = %team.name, "Country already present");
                return Ok(Seeded::existing(country_from_row(&row)));
            }
        }
        KeyMode::Natural => {
            let existing = sqlx::query(
                r#"
                SELECT id, name, group_name, fifa_code
                FROM countries
                WHERE name = ?
                ORDER BY id ASC
                LIMIT 1
                "#,
            )
            .bind(&team.name)
            .fetch_optional(&mut *conn)
            .await?;

            if let Some(row) = existing {
                let mut country = country_from_row(&row);
                if country.group == team.group && country.fifa_code == team.code {
                    debug!(name = %team.name, "Country already present");
                    return Ok(Seeded::existing(country));
                }

                sqlx::query("UPDATE countries SET group_name = ?, fifa_code = ? WHERE id = ?")
                    .bind(&team.group)
                    .bind(&team.code)
                    .bind(country.id.as_i64())
                    .execute(&mut *conn)
                    .await?;

                debug!(
                    name = %team.name,
                    old_group = %country.group,
                    new_group = %team.group,
                    "Country updated in place"
                );
                country.group = team.group.clone();
                country.fifa_code = team.code.clone();
                return Ok(Seeded::updated(country));
            }
        }
    }

    let result = sqlx::query(
        "INSERT INTO countries (name, group_name, fifa_code) VALUES (?, ?, ?)",
    )
    .bind(&team.name)
    .bind(&team.group)
    .bind(&team.code)
    .execute(&mut *conn)
    .await?;

    Ok(Seeded::created(Country {
        id: CountryId::new(result.last_insert_rowid()),
        name: team.name.clone(),
        group: team.group.clone(),
        fifa_code: team.code.clone(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::{init_db, MEMORY_DATABASE};
    use crate::db::repo::Outcome;

    async fn setup_repo() -> Repository {
        let pool = init_db(MEMORY_DATABASE).await.expect("init_db failed");
        Repository::new(pool)
    }

    #[tokio::test]
    async fn test_seed_countries_creates_rows() {
        let repo = setup_repo().await;
        let teams = vec![
            TeamRecord::new("Alpha", "A", "ALP"),
            TeamRecord::new("Beta", "A", "BET"),
        ];

        let seeded = repo.seed_countries(&teams, KeyMode::Compound).await.unwrap();
        assert_eq!(seeded.len(), 2);
        assert!(seeded.iter().all(|s| s.outcome == Outcome::Created));
        assert_eq!(seeded[0].row.name, "Alpha");
        assert_ne!(seeded[0].row.id, seeded[1].row.id);

        let countries = repo.list_countries().await.unwrap();
        assert_eq!(countries.len(), 2);
        assert_eq!(countries[1].fifa_code, "BET");
    }

    #[tokio::test]
    async fn test_compound_key_is_idempotent() {
        let repo = setup_repo().await;
        let teams = vec![TeamRecord::new("Alpha", "A", "ALP")];

        let first = repo.seed_countries(&teams, KeyMode::Compound).await.unwrap();
        let second = repo.seed_countries(&teams, KeyMode::Compound).await.unwrap();

        assert_eq!(second[0].outcome, Outcome::Existing);
        assert_eq!(second[0].row, first[0].row);
        assert_eq!(repo.list_countries().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_compound_key_duplicates_on_group_change() {
        let repo = setup_repo().await;

        repo.seed_countries(&[TeamRecord::new("Alpha", "A", "ALP")], KeyMode::Compound)
            .await
            .unwrap();
        let second = repo
            .seed_countries(&[TeamRecord::new("Alpha", "B", "ALP")], KeyMode::Compound)
            .await
            .unwrap();

        assert_eq!(second[0].outcome, Outcome::Created);
        assert_eq!(repo.list_countries().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_natural_key_updates_in_place() {
        let repo = setup_repo().await;

        let first = repo
            .seed_countries(&[TeamRecord::new("Alpha", "A", "ALP")], KeyMode::Natural)
            .await
            .unwrap();
        let second = repo
            .seed_countries(&[TeamRecord::new("Alpha", "B", "ALQ")], KeyMode::Natural)
            .await
            .unwrap();

        assert_eq!(second[0].outcome, Outcome::Updated);
        assert_eq!(second[0].row.id, first[0].row.id);

        let countries = repo.list_countries().await.unwrap();
        assert_eq!(countries.len(), 1);
        assert_eq!(countries[0].group, "B");
        assert_eq!(countries[0].fifa_code, "ALQ");
    }

    #[tokio::test]
    async fn test_duplicate_records_in_one_batch() {
        let repo = setup_repo().await;
        let teams = vec![
            TeamRecord::new("Alpha", "A", "ALP"),
            TeamRecord::new("Alpha", "A", "ALP"),
        ];

        let seeded = repo.seed_countries(&teams, KeyMode::Compound).await.unwrap();
        assert_eq!(seeded[0].outcome, Outcome::Created);
        assert_eq!(seeded[1].outcome, Outcome::Existing);
        assert_eq!(repo.list_countries().await.unwrap().len(), 1);
    }
}

//! Player operations for the repository.

use crate::domain::{CountryId, NewPlayer, Player};
use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::Row;
use tracing::debug;

use super::{Repository, Seeded};

impl Repository {
    /// Get-or-create one player per record, keyed by (name, position, number).
    ///
    /// The country is only written when the row is created.
    pub async fn seed_players(
        &self,
        players: &[NewPlayer],
    ) -> Result<Vec<Seeded<Player>>, sqlx::Error> {
        let mut seeded = Vec::with_capacity(players.len());
        let mut tx = self.pool.begin().await?;

        for player in players {
            seeded.push(get_or_create_player(&mut *tx, player).await?);
        }

        tx.commit().await?;
        Ok(seeded)
    }

    /// Every player, oldest first.
    pub async fn list_players(&self) -> Result<Vec<Player>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, country_id, name, position, number, goals, yellow, red, saves
            FROM players
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(player_from_row).collect())
    }
}

fn player_from_row(row: &SqliteRow) -> Player {
    Player {
        id: row.get("id"),
        country: row.get::<Option<i64>, _>("country_id").map(CountryId::new),
        name: row.get("name"),
        position: row.get("position"),
        number: row.get("number"),
        goals: row.get("goals"),
        yellow: row.get("yellow"),
        red: row.get("red"),
        saves: row.get("saves"),
    }
}

async fn get_or_create_player(
    conn: &mut SqliteConnection,
    player: &NewPlayer,
) -> Result<Seeded<Player>, sqlx::Error> {
    let existing = sqlx::query(
        r#"
        SELECT id, country_id, name, position, number, goals, yellow, red, saves
        FROM players
        WHERE name = ? AND position = ? AND number = ?
        ORDER BY id ASC
        LIMIT 1
        "#,
    )
    .bind(&player.name)
    .bind(&player.position)
    .bind(player.number)
    .fetch_optional(&mut *conn)
    .await?;

    if let Some(row) = existing {
        debug!(name = %player.name, "Player already present");
        return Ok(Seeded::existing(player_from_row(&row)));
    }

    // Stat columns are left to their schema defaults.
    let row = sqlx::query(
        r#"
        INSERT INTO players (country_id, name, position, number)
        VALUES (?, ?, ?, ?)
        RETURNING id, country_id, name, position, number, goals, yellow, red, saves
        "#,
    )
    .bind(player.country.map(|c| c.as_i64()))
    .bind(&player.name)
    .bind(&player.position)
    .bind(player.number)
    .fetch_one(&mut *conn)
    .await?;

    Ok(Seeded::created(player_from_row(&row)))
}

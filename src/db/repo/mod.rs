//! Repository layer for database operations.
//!
//! This module provides the `Repository` struct for all database operations.
//! Methods are organized across submodules by table:
//! - `countries.rs` - Country get-or-create and listing
//! - `matches.rs` - Match get-or-create, listing and matchday numbering
//! - `players.rs` - Player get-or-create and listing

mod countries;
mod matches;
mod players;

use sqlx::sqlite::SqlitePool;

/// What a get-or-create call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No row matched the key; a new one was inserted.
    Created,
    /// A row matched every keyed field and was returned as is.
    Existing,
    /// A row matched the natural key and its other fields were overwritten.
    Updated,
}

/// A row returned by a get-or-create call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seeded<T> {
    pub row: T,
    pub outcome: Outcome,
}

impl<T> Seeded<T> {
    pub(crate) fn created(row: T) -> Self {
        Seeded {
            row,
            outcome: Outcome::Created,
        }
    }

    pub(crate) fn existing(row: T) -> Self {
        Seeded {
            row,
            outcome: Outcome::Existing,
        }
    }

    pub(crate) fn updated(row: T) -> Self {
        Seeded {
            row,
            outcome: Outcome::Updated,
        }
    }
}

/// Row counts per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub countries: i64,
    pub matches: i64,
    pub players: i64,
}

/// Repository for database operations.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Count the rows of every seeded table.
    pub async fn count_rows(&self) -> Result<TableCounts, sqlx::Error> {
        let countries: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM countries")
            .fetch_one(&self.pool)
            .await?;
        let matches: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM matches")
            .fetch_one(&self.pool)
            .await?;
        let players: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM players")
            .fetch_one(&self.pool)
            .await?;

        Ok(TableCounts {
            countries,
            matches,
            players,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::{init_db, MEMORY_DATABASE};

    #[tokio::test]
    async fn test_count_rows_empty() {
        let pool = init_db(MEMORY_DATABASE).await.expect("init_db failed");
        let repo = Repository::new(pool);

        assert_eq!(repo.count_rows().await.unwrap(), TableCounts::default());
    }
}

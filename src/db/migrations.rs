//! Database initialization and schema creation.

use crate::config::DEFAULT_DATABASE_PATH;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqlitePool, SqlitePoolOptions};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

/// Path value that selects an in-memory database.
pub const MEMORY_DATABASE: &str = "memory";

/// Where a database path points once resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    Memory,
    File(PathBuf),
}

impl DbLocation {
    /// Resolve a user-supplied database path.
    ///
    /// `memory` selects an in-memory database; an existing directory gets
    /// the default file name appended.
    pub fn resolve(db_path: &str) -> DbLocation {
        if db_path == MEMORY_DATABASE || db_path == ":memory:" {
            return DbLocation::Memory;
        }
        let path = Path::new(db_path);
        if path.is_dir() {
            DbLocation::File(path.join(DEFAULT_DATABASE_PATH))
        } else {
            DbLocation::File(path.to_path_buf())
        }
    }
}

impl std::fmt::Display for DbLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DbLocation::Memory => write!(f, ":memory:"),
            DbLocation::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Open (creating if needed) the SQLite database and create any missing tables.
///
/// Existing tables and rows are left untouched.
pub async fn init_db(db_path: &str) -> Result<SqlitePool, sqlx::Error> {
    let location = DbLocation::resolve(db_path);

    let options = match &location {
        DbLocation::Memory => SqliteConnectOptions::from_str("sqlite::memory:")?,
        DbLocation::File(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(sqlx::Error::Io)?;
                }
            }
            SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
        }
    };

    let pool = connect(options).await?;
    run_migrations(&pool).await?;

    info!("Database initialized successfully at {}", location);
    Ok(pool)
}

/// Open an existing database file without write access.
///
/// Nothing is created; a missing file surfaces as a connection error.
pub async fn open_read_only(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .read_only(true);
    connect(options).await
}

/// Drop every seeded table and recreate the schema.
pub async fn reset_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    info!("Purging existing tables...");
    // Children before parents so foreign keys never dangle.
    for table in ["players", "matches", "countries"] {
        sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
            .execute(pool)
            .await?;
    }
    run_migrations(pool).await
}

// One connection for the whole run. It is also what keeps an in-memory
// database alive, so it must never be reaped.
async fn connect(options: SqliteConnectOptions) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .after_connect(|conn, _meta| Box::pin(async move { configure_pragmas_conn(conn).await }))
        .connect_with(options)
        .await
}

/// Run all database migrations.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    info!("Running database migrations...");
    let schema_sql = include_str!("schema.sql");

    for statement in schema_sql.split(';') {
        let trimmed = statement.trim();
        if !trimmed.is_empty() {
            sqlx::query(trimmed).execute(pool).await?;
        }
    }

    info!("Migrations completed successfully");
    Ok(())
}

async fn configure_pragmas_conn(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&mut *conn)
        .await?;
    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&mut *conn)
        .await?;
    Ok(())
}

//! Database module for SQLite operations.
//!
//! This module provides:
//! - Database initialization, read-only opening and purging
//! - Schema creation
//! - Repository layer with get-or-create operations

pub mod migrations;
pub mod repo;

pub use migrations::{init_db, open_read_only, reset_schema, DbLocation, MEMORY_DATABASE};
pub use repo::{Outcome, Repository, Seeded, TableCounts};

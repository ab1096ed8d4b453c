//! SQLite persistence for the cadet Training Record Book.
//!
//! One database file per install. [`connect`] opens (and creates) the file
//! with WAL journaling, [`schema::init`] creates every table idempotently,
//! and the repositories in [`repositories`] provide the typed read/write
//! surface the app screens call.

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

pub mod error;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod seed;

pub use error::DbError;

pub type DbPool = sqlx::SqlitePool;

/// Open the on-device database file, creating it on first run.
///
/// WAL mode gives crash-safe durability for the single writer; foreign keys
/// stay advisory-but-checked for the ids we do declare. The store is private
/// to one device and one logical session, so the pool holds a single
/// connection.
pub async fn connect(path: &Path) -> Result<DbPool, DbError> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    tracing::debug!(path = %path.display(), "opened training record database");
    Ok(pool)
}

/// Open a throwaway in-memory database (tests, previews).
pub async fn connect_in_memory() -> Result<DbPool, DbError> {
    let options = SqliteConnectOptions::new()
        .in_memory(true)
        .foreign_keys(true);

    // One connection: each in-memory connection is its own database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    Ok(pool)
}

//! Database Module
//!
//! SQLite connection pool, migrations and the per-table query functions.

pub mod customers;
pub mod orders;
pub mod snacks;
pub mod vendors;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::str::FromStr;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Database service, owns a SQLite connection pool
#[derive(Clone)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// Open (creating if missing) and migrate the database at `url`.
    ///
    /// In-memory databases are per connection, so they get a single one.
    pub async fn new(url: &str) -> Result<Self, BoxError> {
        let in_memory = url.contains(":memory:");
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| format!("Invalid database url {url}: {e}"))?
            .create_if_missing(true)
            .journal_mode(if in_memory {
                SqliteJournalMode::Memory
            } else {
                SqliteJournalMode::Wal
            })
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .busy_timeout(std::time::Duration::from_secs(5));

        let mut pool_options =
            SqlitePoolOptions::new().max_connections(if in_memory { 1 } else { 5 });
        if in_memory {
            // Closing the only connection would drop the database
            pool_options = pool_options.idle_timeout(None).max_lifetime(None);
        }
        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| format!("Failed to open database: {e}"))?;

        tracing::info!(in_memory, "Database connection established");

        migrate(&pool).await?;
        Ok(Self { pool })
    }
}

/// Apply pending migrations
pub async fn migrate(pool: &SqlitePool) -> Result<(), BoxError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| format!("Failed to apply migrations: {e}"))?;
    tracing::info!("Database migrations applied");
    Ok(())
}

/// True when `err` is a UNIQUE constraint violation
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

/// Build a decode error for a column that holds an unexpected value
pub(crate) fn decode_error(column: &str, msg: impl std::fmt::Display) -> sqlx::Error {
    sqlx::Error::Decode(format!("{column}: {msg}").into())
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    DbService::new("sqlite::memory:").await.unwrap().pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_database_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("van.db").display());

        let db = DbService::new(&url).await.unwrap();
        assert!(snacks::seed_default_menu(&db.pool).await.unwrap() > 0);
        db.pool.close().await;

        // Migrations are idempotent and the menu is not seeded twice
        let db = DbService::new(&url).await.unwrap();
        assert_eq!(snacks::seed_default_menu(&db.pool).await.unwrap(), 0);
        assert!(!snacks::list(&db.pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unique_violation_detected() {
        let pool = test_pool().await;
        let insert = "INSERT INTO snacks (id, name, price) VALUES (?, 'Latte', '4.50')";
        sqlx::query(insert).bind(1_i64).execute(&pool).await.unwrap();
        let err = sqlx::query(insert).bind(2_i64).execute(&pool).await.unwrap_err();
        assert!(is_unique_violation(&err));
    }
}

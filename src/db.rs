use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

pub type DbPool = sqlx::SqlitePool;

/// Creates the SQLite connection pool.
///
/// WAL mode lets concurrent readers proceed while a writer holds the lock;
/// the busy timeout covers short writer contention on the ingestion path.
pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Readiness probe: true iff the messages table exists and is queryable.
/// Consumed by the health endpoint only; ingestion does not gate on it.
pub async fn check_ready(pool: &DbPool) -> bool {
    sqlx::query_scalar::<_, String>(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'messages'",
    )
    .fetch_optional(pool)
    .await
    .map(|row| row.is_some())
    .unwrap_or(false)
}

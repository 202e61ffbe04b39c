use chrono::{SecondsFormat, Utc};

use crate::db::DbPool;
use crate::message::Message;

/// Result of an idempotent insert attempt.
///
/// Duplicate is an expected, frequent outcome, not an error; only genuine
/// storage faults surface as `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Created,
    Duplicate,
}

/// Persists a message exactly once per `message_id`.
///
/// The PRIMARY KEY constraint on `message_id` is the sole arbiter of
/// identity: under concurrent inserts racing on the same id, the storage
/// layer serializes them and exactly one caller observes `Created`. Only a
/// uniqueness conflict maps to `Duplicate`; every other failure propagates
/// so the caller can report a storage fault instead of a false success.
///
/// `created_at` is assigned here, at the moment of the durable write. It is
/// audit-only and never used for ordering or filtering.
pub async fn insert_message(pool: &DbPool, message: &Message) -> Result<InsertOutcome, sqlx::Error> {
    let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

    let result = sqlx::query(
        r#"
        INSERT INTO messages (message_id, from_msisdn, to_msisdn, ts, text, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&message.message_id)
    .bind(&message.from)
    .bind(&message.to)
    .bind(&message.ts)
    .bind(&message.text)
    .bind(&created_at)
    .execute(pool)
    .await;

    match result {
        Ok(_) => Ok(InsertOutcome::Created),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(InsertOutcome::Duplicate),
        Err(e) => Err(e),
    }
}

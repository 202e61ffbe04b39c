use serde::Serialize;

use crate::db::DbPool;

/// Per-sender message count for the top-senders list.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SenderCount {
    #[serde(rename = "from")]
    pub from_msisdn: String,
    pub count: i64,
}

/// Summary statistics over the full stored corpus.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSummary {
    pub total_messages: i64,
    pub senders_count: i64,
    pub messages_per_sender: Vec<SenderCount>,
    pub first_message_ts: Option<String>,
    pub last_message_ts: Option<String>,
}

/// Computes message-level statistics.
///
/// On an empty store this returns zeros, an empty top-senders list, and null
/// timestamps; the empty case is not an error. The queries take a fresh read
/// view each; no cross-query snapshot is guaranteed relative to concurrent
/// ingestions.
pub async fn message_stats(pool: &DbPool) -> Result<StatsSummary, sqlx::Error> {
    let total_messages: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages")
        .fetch_one(pool)
        .await?;

    let senders_count: i64 =
        sqlx::query_scalar("SELECT COUNT(DISTINCT from_msisdn) FROM messages")
            .fetch_one(pool)
            .await?;

    // Ties broken by sender ascending so the ordering is reproducible.
    let messages_per_sender: Vec<SenderCount> = sqlx::query_as(
        r#"
        SELECT from_msisdn, COUNT(*) AS count
        FROM messages
        GROUP BY from_msisdn
        ORDER BY count DESC, from_msisdn ASC
        LIMIT 10
        "#,
    )
    .fetch_all(pool)
    .await?;

    // MIN/MAX over the ISO-8601 strings; lexical order is chronological.
    let (first_message_ts, last_message_ts): (Option<String>, Option<String>) =
        sqlx::query_as("SELECT MIN(ts), MAX(ts) FROM messages")
            .fetch_one(pool)
            .await?;

    Ok(StatsSummary {
        total_messages,
        senders_count,
        messages_per_sender,
        first_message_ts,
        last_message_ts,
    })
}

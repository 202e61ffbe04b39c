use serde::Serialize;
use sqlx::{QueryBuilder, Sqlite};

use crate::db::DbPool;

/// A stored message as exposed by the read API.
/// `created_at` is audit-only and deliberately not part of this view.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MessageRecord {
    pub message_id: String,
    #[serde(rename = "from")]
    pub from_msisdn: String,
    #[serde(rename = "to")]
    pub to_msisdn: String,
    pub ts: String,
    pub text: Option<String>,
}

/// Conjunctive filter set for message listing. Absent filters match all rows.
#[derive(Debug, Clone, Default)]
pub struct MessageFilter {
    /// Exact match against the sender address.
    pub from: Option<String>,
    /// Inclusive lower bound against `ts`, compared as ISO-8601 strings.
    /// Lexical comparison is chronological because the format is fixed-width
    /// and zero-padded, so the value is never parsed.
    pub since: Option<String>,
    /// Case-sensitive substring match against `text`. Rows with NULL text
    /// never match.
    pub contains: Option<String>,
}

impl MessageFilter {
    fn push_where(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        let mut prefix = " WHERE ";
        if let Some(from) = &self.from {
            qb.push(prefix).push("from_msisdn = ").push_bind(from.clone());
            prefix = " AND ";
        }
        if let Some(since) = &self.since {
            qb.push(prefix).push("ts >= ").push_bind(since.clone());
            prefix = " AND ";
        }
        if let Some(contains) = &self.contains {
            // instr() instead of LIKE: LIKE is case-insensitive for ASCII in
            // SQLite and would also treat % and _ in the needle as wildcards.
            qb.push(prefix)
                .push("instr(text, ")
                .push_bind(contains.clone())
                .push(") > 0");
        }
    }
}

/// Retrieves a filtered, paginated slice of messages plus the total count of
/// rows matching the filters before pagination.
///
/// Ordering is always `(ts ASC, message_id ASC)` — a total order even when
/// timestamps tie — regardless of which filters are applied.
pub async fn list_messages(
    pool: &DbPool,
    filter: &MessageFilter,
    limit: i64,
    offset: i64,
) -> Result<(Vec<MessageRecord>, i64), sqlx::Error> {
    // The boundary layer has already validated the bounds; this is only a
    // sanity clamp.
    let limit = limit.clamp(1, 100);
    let offset = offset.max(0);

    let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM messages");
    filter.push_where(&mut count_qb);
    let total: i64 = count_qb.build_query_scalar().fetch_one(pool).await?;

    let mut data_qb = QueryBuilder::new(
        "SELECT message_id, from_msisdn, to_msisdn, ts, text FROM messages",
    );
    filter.push_where(&mut data_qb);
    data_qb
        .push(" ORDER BY ts ASC, message_id ASC LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);

    let messages = data_qb
        .build_query_as::<MessageRecord>()
        .fetch_all(pool)
        .await?;

    Ok((messages, total))
}

// ============================================================================
// Messages Routes
// ============================================================================
//
// Endpoints:
// - GET /messages - List stored messages with pagination and filtering
//
// ============================================================================

use axum::{Json, extract::Query, extract::State, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::context::AppContext;
use crate::error::AppError;
use crate::query::{self, MessageFilter};

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub from: Option<String>,
    pub since: Option<String>,
    pub q: Option<String>,
}

/// GET /messages
///
/// Filters combine conjunctively: `from` (exact sender match), `since`
/// (inclusive ISO-8601 lower bound) and `q` (substring in text). Results are
/// ordered by (ts ASC, message_id ASC); `total` counts matching rows before
/// pagination.
pub async fn list_messages(
    State(app_context): State<Arc<AppContext>>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    if !(1..=MAX_LIMIT).contains(&limit) {
        return Err(AppError::validation(format!(
            "limit: must be between 1 and {}",
            MAX_LIMIT
        )));
    }

    let offset = params.offset.unwrap_or(0);
    if offset < 0 {
        return Err(AppError::validation("offset: must be non-negative"));
    }

    let filter = MessageFilter {
        from: params.from,
        since: params.since,
        contains: params.q,
    };

    let (messages, total) =
        query::list_messages(&app_context.db_pool, &filter, limit, offset).await?;

    Ok(Json(json!({
        "data": messages,
        "total": total,
        "limit": limit,
        "offset": offset,
    })))
}

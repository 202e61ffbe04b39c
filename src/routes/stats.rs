// ============================================================================
// Stats Routes
// ============================================================================
//
// Endpoints:
// - GET /stats - Message-level statistics over the full stored corpus
//
// ============================================================================

use axum::{Json, extract::State, response::IntoResponse};
use std::sync::Arc;

use crate::context::AppContext;
use crate::error::AppError;
use crate::stats::message_stats;

/// GET /stats
pub async fn stats(
    State(app_context): State<Arc<AppContext>>,
) -> Result<impl IntoResponse, AppError> {
    let summary = message_stats(&app_context.db_pool).await?;
    Ok(Json(summary))
}

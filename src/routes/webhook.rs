// ============================================================================
// Webhook Routes
// ============================================================================
//
// Endpoints:
// - POST /webhook - Ingest a signed message with exactly-once storage
//
// ============================================================================

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use bytes::Bytes;
use serde_json::json;
use std::sync::Arc;

use crate::context::AppContext;
use crate::error::AppError;
use crate::ingest::{self, IngestOutcome};
use crate::metrics::record_webhook_outcome;

/// POST /webhook
///
/// Verifies the X-Signature header over the raw body bytes, validates the
/// payload, and stores the message idempotently. Duplicates respond 200
/// exactly like first-time inserts; the distinction is only logged.
pub async fn ingest_webhook(
    State(app_context): State<Arc<AppContext>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let signature = headers.get("X-Signature").and_then(|v| v.to_str().ok());

    let outcome = ingest::ingest(
        &app_context.db_pool,
        &app_context.config.webhook_secret,
        &body,
        signature,
    )
    .await
    .map_err(|e| {
        record_webhook_outcome("error");
        AppError::Database(e)
    })?;

    record_webhook_outcome(outcome.result_tag());

    match outcome {
        IngestOutcome::Unauthorized => Err(AppError::auth("invalid signature")),
        IngestOutcome::Rejected(e) => {
            tracing::warn!(
                result = "validation_error",
                error = %e,
                "webhook payload rejected"
            );
            Err(AppError::from(e))
        }
        IngestOutcome::Created { message_id } => {
            tracing::info!(
                message_id = %message_id,
                dup = false,
                result = "created",
                "message stored"
            );
            Ok((StatusCode::OK, Json(json!({"status": "ok"}))))
        }
        IngestOutcome::Duplicate { message_id } => {
            tracing::info!(
                message_id = %message_id,
                dup = true,
                result = "duplicate",
                "duplicate message ignored"
            );
            Ok((StatusCode::OK, Json(json!({"status": "ok"}))))
        }
    }
}

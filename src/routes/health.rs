// ============================================================================
// Health and Metrics Routes
// ============================================================================
//
// Endpoints:
// - GET /health/live - Liveness probe (always OK while the process runs)
// - GET /health/ready - Readiness probe (secret configured, schema queryable)
// - GET /metrics - Prometheus metrics
//
// ============================================================================

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use std::sync::Arc;

use crate::context::AppContext;
use crate::db;
use crate::error::AppError;
use crate::metrics;

/// GET /health/live
pub async fn live() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

/// GET /health/ready
pub async fn ready(
    State(app_context): State<Arc<AppContext>>,
) -> Result<impl IntoResponse, AppError> {
    if app_context.config.webhook_secret.is_empty() {
        return Ok((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"detail": "WEBHOOK_SECRET not configured"})),
        ));
    }

    if !db::check_ready(&app_context.db_pool).await {
        return Ok((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"detail": "database not ready"})),
        ));
    }

    Ok((StatusCode::OK, Json(json!({"status": "ready"}))))
}

/// GET /metrics
/// Prometheus metrics endpoint
pub async fn metrics() -> Result<impl IntoResponse, AppError> {
    match metrics::gather_metrics() {
        Ok(metrics_data) => Ok((
            StatusCode::OK,
            [("Content-Type", "text/plain; version=0.0.4")],
            metrics_data,
        )),
        Err(e) => {
            tracing::error!("Failed to gather metrics: {}", e);
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                [("Content-Type", "text/plain")],
                "Internal Server Error".to_string(),
            ))
        }
    }
}

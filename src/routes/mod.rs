// ============================================================================
// Axum Routes Module
// ============================================================================
//
// Structure:
// - mod.rs: Router assembly and middleware wiring
// - webhook.rs: Signed message ingestion
// - messages.rs: Paginated/filtered message listing
// - stats.rs: Message-level statistics
// - health.rs: Liveness/readiness probes and Prometheus metrics
// - middleware.rs: Request logging and HTTP metrics
//
// ============================================================================

mod health;
mod messages;
mod middleware;
mod stats;
mod webhook;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::context::AppContext;

/// Create the main application router with all routes
pub fn create_router(app_context: Arc<AppContext>) -> Router {
    Router::new()
        // Ingestion
        .route("/webhook", post(webhook::ingest_webhook))
        // Read side
        .route("/messages", get(messages::list_messages))
        .route("/stats", get(stats::stats))
        // Health and monitoring
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .route("/metrics", get(health::metrics))
        // Apply middleware (order matters - last added runs first)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn(middleware::request_logging))
                .into_inner(),
        )
        .with_state(app_context)
}

use anyhow::Result;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod config;
pub mod context;
pub mod db;
pub mod error;
pub mod ingest;
pub mod message;
pub mod metrics;
pub mod query;
pub mod routes;
pub mod signature;
pub mod stats;
pub mod store;

use config::Config;
use context::AppContext;

pub async fn run() -> Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Refuse to start without a shared secret: every accepted webhook would
    // otherwise be unverifiable.
    if config.webhook_secret.is_empty() {
        anyhow::bail!("WEBHOOK_SECRET must be set");
    }

    // Connect to database and apply schema
    let db_pool = db::create_pool(&config.database_url).await?;
    sqlx::migrate!("./migrations").run(&db_pool).await?;
    tracing::info!(database_url = %config.database_url, "database schema ready");

    let app_config = Arc::new(config);
    let app_context = Arc::new(AppContext::new(db_pool, app_config.clone()));

    let router = routes::create_router(app_context);

    let bind_address = format!("0.0.0.0:{}", app_config.port);
    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!("webhook-relay listening on http://{}", bind_address);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = signal::ctrl_c().await;
            tracing::info!("shutdown signal received, shutting down");
        })
        .await?;

    Ok(())
}

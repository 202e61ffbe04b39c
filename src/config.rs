use anyhow::Result;

// Default bind port for the HTTP server.
const DEFAULT_PORT: u16 = 8080;

const DEFAULT_DATABASE_URL: &str = "sqlite://data/relay.db";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Application configuration, loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// SQLite database URL, e.g. `sqlite://data/relay.db`.
    pub database_url: String,
    /// Shared secret for webhook HMAC-SHA256 signature verification.
    /// Must be non-empty before the server starts accepting webhooks;
    /// `run()` refuses to start otherwise.
    pub webhook_secret: String,
    /// Default tracing filter when RUST_LOG is not set.
    pub log_level: String,
    /// HTTP listen port.
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            webhook_secret: std::env::var("WEBHOOK_SECRET").unwrap_or_default(),
            log_level: std::env::var("LOG_LEVEL")
                .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        })
    }
}

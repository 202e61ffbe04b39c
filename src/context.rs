use crate::config::Config;
use crate::db::DbPool;
use std::sync::Arc;

/// Application context containing shared dependencies.
/// Injected into handlers as axum state instead of reaching into globals.
#[derive(Clone)]
pub struct AppContext {
    pub db_pool: DbPool,
    pub config: Arc<Config>,
}

impl AppContext {
    pub fn new(db_pool: DbPool, config: Arc<Config>) -> Self {
        Self { db_pool, config }
    }
}

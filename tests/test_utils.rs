use std::sync::Arc;

use webhook_relay::{config::Config, context::AppContext, db, routes, signature};

pub const TEST_SECRET: &str = "test_secret_key_for_testing";

pub struct TestApp {
    pub address: String,
    pub db_pool: db::DbPool,
    // Held so the backing database file outlives the test.
    _db_file: tempfile::NamedTempFile,
}

/// Spins up the full application against a fresh temporary SQLite database
/// and returns its address. Each test gets its own isolated store.
pub async fn spawn_app() -> TestApp {
    let db_file = tempfile::NamedTempFile::new().expect("failed to create temp database file");
    let database_url = format!("sqlite://{}", db_file.path().display());

    let config = Config {
        database_url: database_url.clone(),
        webhook_secret: TEST_SECRET.to_string(),
        log_level: "info".to_string(),
        port: 0,
    };

    let db_pool = db::create_pool(&database_url)
        .await
        .expect("failed to connect to the database");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("failed to migrate the database");

    let app_context = Arc::new(AppContext::new(db_pool.clone(), Arc::new(config)));
    let router = routes::create_router(app_context);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = format!("127.0.0.1:{}", listener.local_addr().unwrap().port());

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestApp {
        address,
        db_pool,
        _db_file: db_file,
    }
}

pub fn sign(body: &str) -> String {
    signature::compute_signature(TEST_SECRET, body.as_bytes())
}

/// Posts a body to /webhook with a valid signature over those exact bytes.
pub async fn post_signed(
    client: &reqwest::Client,
    address: &str,
    body: String,
) -> reqwest::Response {
    let signature = sign(&body);
    client
        .post(format!("http://{}/webhook", address))
        .header("Content-Type", "application/json")
        .header("X-Signature", signature)
        .body(body)
        .send()
        .await
        .unwrap()
}

/// Seeds a message through the webhook endpoint, asserting success.
pub async fn seed_message(client: &reqwest::Client, address: &str, message: &serde_json::Value) {
    let response = post_signed(client, address, message.to_string()).await;
    assert_eq!(response.status(), 200, "seeding message failed");
}

pub async fn count_messages(pool: &db::DbPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM messages")
        .fetch_one(pool)
        .await
        .unwrap()
}

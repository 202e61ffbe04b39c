//! Inspection utility for the messages database: prints the table DDL,
//! indexes, column details, and a row-count summary.

use anyhow::Result;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Connection, Row, SqliteConnection};
use std::str::FromStr;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/relay.db".to_string());

    let options = SqliteConnectOptions::from_str(&database_url)?;
    let mut conn = SqliteConnection::connect_with(&options).await?;

    println!("{}", "=".repeat(60));
    println!("MESSAGES TABLE SCHEMA");
    println!("{}", "=".repeat(60));
    let schema: Option<String> = sqlx::query_scalar(
        "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = 'messages'",
    )
    .fetch_optional(&mut conn)
    .await?;
    match schema {
        Some(sql) => println!("{}", sql),
        None => println!("Table not created yet"),
    }

    println!();
    println!("{}", "=".repeat(60));
    println!("INDEXES");
    println!("{}", "=".repeat(60));
    let indexes: Vec<String> = sqlx::query_scalar(
        "SELECT sql FROM sqlite_master WHERE type = 'index' AND tbl_name = 'messages' AND sql IS NOT NULL",
    )
    .fetch_all(&mut conn)
    .await?;
    if indexes.is_empty() {
        println!("No indexes yet");
    } else {
        for idx in indexes {
            println!("{}", idx);
        }
    }

    println!();
    println!("{}", "=".repeat(60));
    println!("COLUMN DETAILS");
    println!("{}", "=".repeat(60));
    let columns = sqlx::query("PRAGMA table_info(messages)")
        .fetch_all(&mut conn)
        .await?;
    if columns.is_empty() {
        println!("Table not created yet");
    } else {
        println!(
            "{:<5} {:<15} {:<10} {:<10} {:<5}",
            "CID", "Name", "Type", "NotNull", "PK"
        );
        println!("{}", "-".repeat(60));
        for col in &columns {
            let cid: i64 = col.get("cid");
            let name: String = col.get("name");
            let col_type: String = col.get("type");
            let not_null: i64 = col.get("notnull");
            let pk: i64 = col.get("pk");
            println!(
                "{:<5} {:<15} {:<10} {:<10} {:<5}",
                cid, name, col_type, not_null, pk
            );
        }
    }

    println!();
    println!("{}", "=".repeat(60));
    println!("DATA SUMMARY");
    println!("{}", "=".repeat(60));
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages")
        .fetch_one(&mut conn)
        .await
        .unwrap_or(0);
    println!("Total messages: {}", count);

    if count > 0 {
        println!();
        println!("Sample rows (first 5):");
        let samples = sqlx::query("SELECT message_id, from_msisdn, ts FROM messages LIMIT 5")
            .fetch_all(&mut conn)
            .await?;
        for row in &samples {
            let id: String = row.get("message_id");
            let from: String = row.get("from_msisdn");
            let ts: String = row.get("ts");
            println!("  {} {} {}", id, from, ts);
        }
    }

    Ok(())
}

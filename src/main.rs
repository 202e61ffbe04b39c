#[tokio::main]
async fn main() -> anyhow::Result<()> {
    webhook_relay::run().await
}

//! Process entry point: read the environment, set up logging, serve.

use sidewinder_server::ServerBuilder;
use sidewinder_store::MemoryMoveLog;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr =
        std::env::var("SIDEWINDER_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

    let server = ServerBuilder::new()
        .bind(&addr)
        .build(MemoryMoveLog::new())
        .await?;

    tracing::info!(%addr, "sidewinder listening");
    server.run().await?;
    Ok(())
}

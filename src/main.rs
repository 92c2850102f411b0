//! TaskFlow - HTTP Server Entry Point
//!
//! Starts the HTTP server that exposes the task API.

use taskflow::{api, config::Config};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskflow=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Loaded configuration: database={}",
        config.database_path.display()
    );

    // Start HTTP server
    info!("Starting server on {}:{}", config.host, config.port);
    api::serve(config).await?;

    Ok(())
}

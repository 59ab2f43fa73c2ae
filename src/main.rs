use anyhow::{Context, Result};
use feedwire::{http, Config, Poller};

#[tokio::main]
async fn main() -> Result<()> {
    // Values from .env never override variables already set in the environment
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Failed to load .env file"),
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting feed poller");

    let config = Config::from_env();
    tracing::info!(
        gateway = %config.gateway_url,
        interval_secs = config.poll_interval.as_secs(),
        timeout_secs = config.request_timeout.as_secs(),
        feeds = config.sources.len(),
        "Configuration loaded"
    );

    let client = http::build_client().context("Failed to build HTTP client")?;
    let poller = Poller::new(config, client);

    tokio::select! {
        _ = poller.run_forever() => {}
        result = tokio::signal::ctrl_c() => {
            result.context("Failed to listen for shutdown signal")?;
            tracing::info!("Shutdown signal received, exiting");
        }
    }

    Ok(())
}

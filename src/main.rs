mod bot;
mod config;
mod error;
mod keywords;
mod line;
mod server;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::bot::AppState;
use crate::config::ServerConfig;
use crate::keywords::KeywordTable;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,linebot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Build the reply table from the embedded flex messages
    let keywords = KeywordTable::load().context("Failed to build keyword table")?;
    info!("Loaded {} keyword entries", keywords.len());

    let state = Arc::new(AppState::new(keywords));

    let server_config = ServerConfig::from_env().context("Failed to read server config")?;
    let addr = server_config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    info!("Webhook server listening on {addr}");
    axum::serve(listener, server::router(state))
        .await
        .context("Server error")?;

    Ok(())
}

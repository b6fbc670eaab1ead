//! route-ledger server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints over the
//! configured local store.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use route_ledger::api;
use route_ledger::app_state::AppState;
use route_ledger::config::{LedgerConfig, LogFormat, StoreBackend};
use route_ledger::persistence::{FileStore, KeyValueStore, MemoryStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = LedgerConfig::from_env().context("loading configuration")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    tracing::info!(addr = %config.listen_addr, store = ?config.store_backend, "starting route-ledger");

    // Build persistence layer
    let backend: Arc<dyn KeyValueStore> = match config.store_backend {
        StoreBackend::File => Arc::new(
            FileStore::open(&config.data_dir)
                .await
                .with_context(|| format!("opening data dir {}", config.data_dir.display()))?,
        ),
        StoreBackend::Memory => {
            tracing::warn!("memory store selected, data is lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    // Build application state and router
    let app_state = AppState::new(backend, config.strict_decode, config.event_bus_capacity);
    let app = api::build_app(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

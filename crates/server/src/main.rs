//! gndcache server entry point.
//!
//! Boots the HTTP server: loads configuration, opens the document store
//! (fatal if that fails), builds the upstream client, and serves the
//! router. Caching faults after startup never bring the process down.

use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use gndcache_client::{UpstreamClient, UpstreamConfig};
use gndcache_core::{AppConfig, StoreDb};

mod resolve;
mod routes;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = AppConfig::load()?;
    let db_path = config.require_db_path()?.to_path_buf();

    let store = StoreDb::open(&db_path).await?;

    let upstream = UpstreamClient::new(UpstreamConfig {
        base_url: config.upstream_base_url.clone(),
        user_agent: config.user_agent.clone(),
        timeout: config.timeout(),
    })?;

    let state = Arc::new(routes::AppState { store, upstream });

    let listener = TcpListener::bind(&config.listen_addr).await?;
    tracing::info!(
        db = %db_path.display(),
        addr = %config.listen_addr,
        upstream = %config.upstream_base_url,
        "gndcache listening"
    );

    axum::serve(listener, routes::router(state)).await?;

    Ok(())
}

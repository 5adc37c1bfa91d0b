//! Webroot - static content server
//!
//! Serves files and directory listings from a configured web root,
//! keeping everything it has served in an in-memory cache.

mod error;
mod server;
mod types;

use crate::error::Result;
use crate::server::{start_server, ServerState, SharedHost, SharedState};
use crate::types::ServerConfig;
use resource_host::HostConfig;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let env_filter = EnvFilter::from_default_env().add_directive("webroot_server=info".parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    };

    info!("Starting webroot server...");

    // Load configuration from environment
    let config = load_config();
    info!("Port: {}", config.port);
    info!("Web root: {}", config.web_root);
    info!("Index files: {:?}", config.index_files);

    let host = SharedHost::new(HostConfig {
        base_path: config.web_root,
        index_files: config.index_files,
    });

    // Create shared state
    let state: SharedState = Arc::new(ServerState::new(host));

    // Start HTTP server (blocking)
    start_server(state, config.port).await?;

    Ok(())
}

fn load_config() -> ServerConfig {
    let defaults = ServerConfig::default();

    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(defaults.port);

    let web_root = std::env::var("WEB_ROOT").unwrap_or(defaults.web_root);

    let index_files = std::env::var("INDEX_FILES")
        .map(|s| s.split(',').map(|f| f.trim().to_string()).collect())
        .unwrap_or(defaults.index_files);

    ServerConfig {
        port,
        web_root,
        index_files,
    }
}

//! Core types for the webroot server

use resource_host::CacheStats;
use serde::Serialize;

/// Configuration for the server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub web_root: String,
    pub index_files: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            web_root: "./public".to_string(),
            index_files: vec!["index.html".to_string(), "index.htm".to_string()],
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
    pub cache: CacheStats,
}

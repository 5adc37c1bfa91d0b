//! HTTP server for static resource endpoints
//!
//! Provides /health plus a catch-all route resolving request paths
//! against the resource host.

use crate::types::HealthResponse;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use resource_host::{CacheStats, HostConfig, Resource, ResourceHost};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tracing::info;

/// Thread-safe wrapper around a resource host.
///
/// The host's lookup-then-insert sequence is not atomic, so the whole
/// resolve call is serialized behind one mutex; cached resources come back
/// as shared handles and need no further locking to read.
pub struct SharedHost {
    inner: Mutex<ResourceHost>,
}

impl SharedHost {
    pub fn new(config: HostConfig) -> Self {
        Self {
            inner: Mutex::new(ResourceHost::new(config)),
        }
    }

    pub async fn resolve(&self, uri: &str) -> Option<Arc<Resource>> {
        self.inner.lock().await.resolve(uri)
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.lock().await.stats()
    }
}

/// Shared state for the HTTP server
pub struct ServerState {
    pub host: SharedHost,
    pub started_at: DateTime<Utc>,
}

impl ServerState {
    pub fn new(host: SharedHost) -> Self {
        Self {
            host,
            started_at: Utc::now(),
        }
    }
}

pub type SharedState = Arc<ServerState>;

/// Error response
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Create the HTTP router
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/", get(serve_root))
        .route("/{*path}", get(serve_path))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(state: SharedState, port: u16) -> std::io::Result<()> {
    let router = create_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await
}

/// Health check endpoint
async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let cache_stats = state.host.stats().await;
    let uptime_secs = (Utc::now() - state.started_at).num_seconds() as u64;

    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs,
        cache: cache_stats,
    })
}

async fn serve_root(State(state): State<SharedState>) -> Response {
    serve_uri(&state, "/").await
}

async fn serve_path(State(state): State<SharedState>, Path(path): Path<String>) -> Response {
    let uri = format!("/{}", path);
    serve_uri(&state, &uri).await
}

/// Resolve a request URI and translate the outcome to a response
async fn serve_uri(state: &ServerState, uri: &str) -> Response {
    match state.host.resolve(uri).await {
        Some(resource) => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, resource.mime_type())
            .body(Body::from(resource.data().to_vec()))
            .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response()),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Resource not found".to_string(),
            }),
        )
            .into_response(),
    }
}

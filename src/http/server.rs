//! HTTP server setup.
//!
//! # Responsibilities
//! - Build the axum Router with every route and middleware layer
//! - Hold the shared immutable application state
//! - Serve with graceful shutdown
//!
//! # Design Decisions
//! - All shared state is constructed once at startup and read-only after;
//!   concurrent requests touch it without locks
//! - Middleware order is fixed here and nowhere else

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::middleware::from_fn;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::EdgeConfig;
use crate::http::middleware::{
    cache_control, clacks, pronouns_acceptable, security_headers, trim_slash,
};
use crate::identity::IdentityRecord;
use crate::routes;
use crate::routes::domains::DomainAllowList;

/// Immutable application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// The fixed WebFinger identity.
    pub identity: Arc<IdentityRecord>,

    /// Hostnames eligible for on-demand TLS.
    pub domains: Arc<DomainAllowList>,

    /// Root of the static output tree.
    pub content_root: Arc<PathBuf>,
}

impl AppState {
    pub fn new(config: &EdgeConfig) -> Self {
        Self {
            identity: Arc::new(IdentityRecord::default()),
            domains: Arc::new(DomainAllowList::new()),
            content_root: Arc::new(config.content.root.clone()),
        }
    }

    /// State over an empty content root, for handler tests that never touch
    /// the filesystem.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::new(&EdgeConfig::default())
    }
}

/// HTTP server for the edge responder.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: &EdgeConfig) -> Self {
        let state = AppState::new(config);
        Self {
            router: build_router(config, state),
        }
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the router with the full middleware pipeline.
///
/// Layers apply outermost-last here, so the request passes through: trace →
/// timeout → compression → security_headers → cache_control → pronouns →
/// clacks → trim_slash → routes. Every layer mutates response headers in
/// place; none reconstructs the response, so nothing set downstream is lost.
/// `trim_slash` sits innermost: handlers still never see a trailing slash,
/// and its early redirect passes back through every header layer, which
/// must decorate all responses including redirects.
pub fn build_router(config: &EdgeConfig, state: AppState) -> Router {
    routes::router(config.listener.port)
        .with_state(state)
        .layer(from_fn(trim_slash))
        .layer(from_fn(clacks))
        .layer(from_fn(pronouns_acceptable))
        .layer(from_fn(cache_control))
        .layer(from_fn(security_headers))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.timeouts.request_secs,
        )))
        .layer(TraceLayer::new_for_http())
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}

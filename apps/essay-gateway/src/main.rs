//! Essay Analyzer Gateway
//!
//! HTTP front door for essay analysis. Provides REST API endpoints for:
//!
//! - Remote analysis, delegated to the external AI analysis backend
//! - Local heuristic pillar scoring
//! - Health and service metadata
//!
//! ## Architecture
//!
//! The gateway owns input sanitation, transport to the backend, validation
//! of what comes back, and the mapping of failures onto HTTP statuses. The
//! analysis itself lives in `essay-core`.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use essay_core::RemoteAnalyzer;

mod api;
mod config;
mod error;

use api::{handle_analyze_essay, handle_health, handle_heuristic_analysis, handle_root};
use config::Config;

/// Largest accepted request body
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Configured backend client; read-only after startup
    pub remote: RemoteAnalyzer,
}

/// Build the router with every endpoint and the request-level middleware
pub fn app(state: AppState) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_root))
        .route("/api/health", get(handle_health))
        .route("/api/analyze-essay", post(handle_analyze_essay))
        .route("/api/heuristic-analysis", post(handle_heuristic_analysis))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load();

    // Initialize logging
    let log_level = if config.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr: SocketAddr = config.socket_addr()?;
    info!("Starting essay gateway on {}", addr);

    // Create rate limiter configuration
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(config.rate_limit.into())
            .burst_size(config.rate_limit.saturating_mul(2))
            .finish()
            .ok_or_else(|| anyhow::anyhow!("rate limit must be at least 1 request/second"))?,
    );

    let state = AppState {
        remote: config.remote_analyzer(),
    };

    let app = app(state).layer(GovernorLayer {
        config: governor_conf,
    });

    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Analysis backend: {}", config.backend_url);
    info!("Backend timeout: {}s", config.timeout_secs);
    info!("Rate limit: {} requests/second per IP", config.rate_limit);
    info!("Health check: http://{}/api/health", addr);

    // The rate limiter keys on the peer address
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

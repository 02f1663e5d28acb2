//! Bloglist Server Library
//!
//! REST API for blog listings owned by registered users, plus list
//! statistics computed by `bloglist-core`.

pub mod blogs;
pub mod core;

use axum::{routing::get, Router};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use crate::core::{AppState, ServerConfig};

/// Build the full application router over `state`
pub fn app(state: AppState) -> Router {
    let api = crate::core::router(state.clone())
        .merge(blogs::router(state.clone()))
        .route("/health", get(health_check));

    Router::new()
        .nest("/api", api)
        .with_state(state)
        .layer(tower_http::cors::CorsLayer::permissive())
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

pub async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        // Already set, ignore
    }

    info!("=== Bloglist Server ===");

    let config = ServerConfig::default();
    info!("Data directory: {:?}", config.data_dir);
    info!("Users database: {:?}", config.users_db_path());

    let state = AppState::new(config.clone()).await?;
    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Listening on http://localhost:{}", config.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK - Bloglist Server"
}

//! HTTP server assembly and launch
//!
//! Builds the full application (everything nested under `/api`) and runs the
//! listener. Startup is synchronous and blocking: `run` returns only when
//! the server stops.

use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::{api, config::Settings, state::AppState};

/// Builds the full application router
///
/// All routes are mounted under the `/api` prefix. Separated from [`run`] so
/// tests can serve the exact production router on an ephemeral port.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", api::router(state))
        .layer(CorsLayer::permissive())
}

/// Runs the HTTP server with the configured host and port
///
/// Logs one startup line containing the resolved host and port, then hands
/// control to the server runtime for the life of the process.
///
/// # Errors
///
/// Returns an error if the bind address is invalid, the listener cannot
/// bind, or the server fails while running.
pub async fn run(settings: &Settings, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = app(state);

    let addr: SocketAddr = settings.server.bind_address().parse()?;
    info!(
        "agent-gateway listening on {}:{}",
        settings.server.host, settings.server.port
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

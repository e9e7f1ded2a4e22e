//! Shared test harness
//!
//! Serves the production router on an ephemeral port so tests exercise the
//! gateway over real HTTP.

use std::sync::Arc;

use agent_gateway::{server, state::AppState};
use tokio::net::TcpListener;

/// Spawns the gateway on `127.0.0.1:0` and returns its base URL
pub async fn spawn_gateway() -> String {
    let state = Arc::new(AppState::with_mock());
    let app = server::app(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    format!("http://{}", addr)
}

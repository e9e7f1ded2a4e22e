//! Route group for screenshot capture
//!
//! Enumerates capturable windows, reports backend capabilities, and captures
//! windows or displays. Responses carry the encoded image as base64 plus the
//! path the image was persisted to.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use super::ApiError;
use crate::{
    model::{
        Capabilities, CaptureDisplayRequest, CaptureResponse, CaptureWindowRequest, WindowInfo,
    },
    state::AppState,
    tools,
};

/// Routes for the screenshot group, mounted at `/api/screenshot`
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/windows", get(list_windows))
        .route("/capabilities", get(capabilities))
        .route("/window", post(capture_window))
        .route("/display", post(capture_display))
}

/// Enumerates capturable windows
async fn list_windows(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<WindowInfo>>, ApiError> {
    let windows = tools::list_windows(&state).await.map_err(ApiError::Capture)?;
    Ok(Json(windows))
}

/// Reports the capture backend's capability flags
async fn capabilities(State(state): State<Arc<AppState>>) -> Json<Capabilities> {
    Json(state.backend.capabilities())
}

/// Captures a window selected by title, class, or executable
async fn capture_window(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CaptureWindowRequest>,
) -> Result<Json<CaptureResponse>, ApiError> {
    let response = tools::capture_window(&state, &req)
        .await
        .map_err(ApiError::Capture)?;
    Ok(Json(response))
}

/// Captures an entire display (primary when `display_id` is omitted)
async fn capture_display(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CaptureDisplayRequest>,
) -> Result<Json<CaptureResponse>, ApiError> {
    let response = tools::capture_display(&state, &req)
        .await
        .map_err(ApiError::Capture)?;
    Ok(Json(response))
}

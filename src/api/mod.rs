//! REST API for the gateway
//!
//! This is the parent route aggregator: it mounts the three route groups
//! (`tools`, `screenshot`, `mcp`) under their prefixes and maps domain
//! errors onto HTTP responses. Every route of the gateway lives under the
//! `/api` prefix; `GET /api/` lists the mounted groups.

pub mod mcp;
pub mod screenshot;
pub mod tools;

use std::sync::Arc;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use serde_json::json;

use crate::{error::CaptureError, state::AppState, tools::ToolError};

/// One mounted route group: its full path prefix and descriptive tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteGroup {
    /// Full path prefix the group is reachable under
    pub path: &'static str,
    /// Descriptive tag for the group
    pub tag: &'static str,
}

/// The three route groups the parent router mounts
///
/// Prefixes are disjoint by construction; there are no precedence conflicts.
pub const ROUTE_GROUPS: [RouteGroup; 3] = [
    RouteGroup {
        path: "/api/tools",
        tag: "tools",
    },
    RouteGroup {
        path: "/api/screenshot",
        tag: "screenshot",
    },
    RouteGroup {
        path: "/api/mcp",
        tag: "mcp",
    },
];

/// Builds the parent router with all three groups mounted
///
/// The caller nests this under `/api`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .nest("/tools", tools::router())
        .nest("/screenshot", screenshot::router())
        .nest_service("/mcp", mcp::service(state.clone()))
        .with_state(state)
}

/// Lists the mounted route groups with their tags
async fn index() -> Json<serde_json::Value> {
    Json(json!({ "groups": ROUTE_GROUPS }))
}

/// API errors for the REST surface
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Capture-level failure
    #[error(transparent)]
    Capture(#[from] CaptureError),
    /// Tool dispatch failure
    #[error(transparent)]
    Tool(#[from] ToolError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, hint) = match &self {
            ApiError::Capture(err) => capture_status(err),
            ApiError::Tool(ToolError::UnknownTool(name)) => {
                (StatusCode::NOT_FOUND, format!("Unknown tool: {name}"), None)
            }
            ApiError::Tool(ToolError::InvalidArguments(e)) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid tool arguments: {e}"),
                None,
            ),
            ApiError::Tool(ToolError::Serialization(e)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to serialize tool result: {e}"),
                None,
            ),
            ApiError::Tool(ToolError::Capture(err)) => capture_status(err),
        };

        let mut body = json!({ "error": message });
        if let Some(hint) = hint {
            body["hint"] = json!(hint);
        }

        (status, Json(body)).into_response()
    }
}

/// Maps a capture error to a status code, message, and remediation hint
fn capture_status(err: &CaptureError) -> (StatusCode, String, Option<String>) {
    let status = match err {
        CaptureError::WindowNotFound { .. } => StatusCode::NOT_FOUND,
        CaptureError::InvalidParameter { .. } => StatusCode::BAD_REQUEST,
        CaptureError::BackendNotAvailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        CaptureError::EncodingFailed { .. } | CaptureError::Io(_) | CaptureError::Image(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, err.to_string(), Some(err.remediation_hint().to_string()))
}

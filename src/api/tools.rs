//! Route group for the tool registry
//!
//! Exposes the gateway's tools over plain REST: list the registered tools
//! and invoke one by name. The same tools are available over MCP via the
//! `mcp` group.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use serde_json::Value;

use super::ApiError;
use crate::{
    state::AppState,
    tools::{self, ToolDescriptor},
};

/// Routes for the tools group, mounted at `/api/tools`
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_tools))
        .route("/{name}", post(call_tool))
}

/// Lists the registered tool descriptors
async fn list_tools() -> Json<Vec<ToolDescriptor>> {
    Json(tools::descriptors())
}

/// Invokes a tool by name with a JSON argument object
///
/// A missing body is treated as an empty argument object.
async fn call_tool(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    args: Option<Json<Value>>,
) -> Result<Json<Value>, ApiError> {
    let Json(args) = args.unwrap_or_else(|| Json(Value::Object(Default::default())));

    let result = tools::dispatch(&state, &name, args).await?;
    Ok(Json(result))
}

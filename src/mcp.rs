//! MCP service implementation with tool routing
//!
//! `GatewayMcpServer` exposes the tool registry over the Model Context
//! Protocol. The server is transport-agnostic: the launcher serves it over
//! stdio with `--stdio`, and the `/api/mcp` route group serves it over
//! streamable HTTP.

use std::sync::Arc;

use rmcp::{
    ServerHandler,
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ErrorData as McpError, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};

use crate::{
    error::CaptureError,
    model::{CaptureDisplayRequest, CaptureResponse, CaptureWindowRequest},
    state::AppState,
    tools,
};

/// MCP server for the gateway's agent tools
///
/// # Tools
///
/// - `health_check`: platform detection and gateway health status
/// - `list_windows`: enumerate all capturable windows
/// - `capture_window`: capture a screenshot of a specific window
/// - `capture_display`: capture a screenshot of an entire display
#[derive(Clone)]
pub struct GatewayMcpServer {
    /// Tool router for dispatching tool calls
    tool_router: ToolRouter<Self>,
    state: Arc<AppState>,
}

#[tool_router]
impl GatewayMcpServer {
    /// Creates a new server sharing the gateway's application state
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            state,
        }
    }

    /// Convenience constructor wired with the synthetic backend
    pub fn new_with_mock() -> Self {
        Self::new(Arc::new(AppState::with_mock()))
    }

    /// Health check tool - reports gateway status and the detected
    /// platform/backend
    #[tool(description = "Check gateway health and detect platform/backend")]
    pub async fn health_check(&self) -> Result<CallToolResult, McpError> {
        let response = tools::health(&self.state).await;

        let json_str = serde_json::to_string(&response).map_err(|e| {
            McpError::internal_error(format!("Failed to serialize health response: {}", e), None)
        })?;

        Ok(CallToolResult::success(vec![Content::text(json_str)]))
    }

    /// Lists all capturable windows as a JSON array
    #[tool(description = "List all capturable windows on the system")]
    pub async fn list_windows(&self) -> Result<CallToolResult, McpError> {
        let windows = tools::list_windows(&self.state)
            .await
            .map_err(capture_error_to_mcp)?;

        let json_str = serde_json::to_string(&windows).map_err(|e| {
            McpError::internal_error(format!("Failed to serialize window list: {}", e), None)
        })?;

        Ok(CallToolResult::success(vec![Content::text(json_str)]))
    }

    /// Captures a window selected by title, class, or executable and returns
    /// the image inline plus a metadata block
    #[tool(description = "Capture a screenshot of a window selected by title, class, or executable")]
    pub async fn capture_window(
        &self,
        Parameters(params): Parameters<CaptureWindowRequest>,
    ) -> Result<CallToolResult, McpError> {
        let response = tools::capture_window(&self.state, &params)
            .await
            .map_err(capture_error_to_mcp)?;

        Ok(capture_content(&response))
    }

    /// Captures an entire display (primary when no display_id is given)
    #[tool(description = "Capture a screenshot of an entire display")]
    pub async fn capture_display(
        &self,
        Parameters(params): Parameters<CaptureDisplayRequest>,
    ) -> Result<CallToolResult, McpError> {
        let response = tools::capture_display(&self.state, &params)
            .await
            .map_err(capture_error_to_mcp)?;

        Ok(capture_content(&response))
    }
}

impl Default for GatewayMcpServer {
    fn default() -> Self {
        Self::new_with_mock()
    }
}

#[tool_handler]
impl ServerHandler for GatewayMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "Agent gateway tools: capture screenshots of windows and displays, \
                 enumerate windows, and check gateway health."
                    .to_string(),
            ),
            ..ServerInfo::default()
        }
    }
}

/// Converts a CaptureError to an MCP error with its remediation hint attached
///
/// Selector and parameter problems map to invalid-params; everything else is
/// an internal error.
fn capture_error_to_mcp(error: CaptureError) -> McpError {
    let message = format!("{}. Hint: {}", error, error.remediation_hint());
    match &error {
        CaptureError::WindowNotFound { .. } | CaptureError::InvalidParameter { .. } => {
            McpError::invalid_params(message, None)
        }
        _ => McpError::internal_error(message, None),
    }
}

/// Builds dual-format capture output: inline image content for immediate
/// preview plus a JSON metadata text block
fn capture_content(response: &CaptureResponse) -> CallToolResult {
    let image = Content::image(response.image_base64.clone(), response.mime_type.clone());

    let metadata = serde_json::json!({
        "dimensions": [response.width, response.height],
        "mime_type": response.mime_type,
        "size_bytes": response.size_bytes,
        "file_path": response.file_path,
    });
    let metadata_str = serde_json::to_string_pretty(&metadata)
        .unwrap_or_else(|_| r#"{"error": "Failed to serialize metadata"}"#.to_string());

    CallToolResult::success(vec![image, Content::text(metadata_str)])
}

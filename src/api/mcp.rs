//! Route group for the MCP endpoint
//!
//! Mounts the gateway's MCP server over rmcp's streamable-HTTP transport.
//! The MCP wire protocol itself is handled entirely by the rmcp service;
//! this module only wires it to the shared application state.

use std::{sync::Arc, time::Duration};

use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};

use crate::{mcp::GatewayMcpServer, state::AppState};

/// Keep-alive interval for SSE streams of stateful sessions
const SSE_KEEP_ALIVE: Duration = Duration::from_secs(15);

/// Builds the streamable-HTTP MCP service, mounted at `/api/mcp`
pub fn service(
    state: Arc<AppState>,
) -> StreamableHttpService<GatewayMcpServer, LocalSessionManager> {
    let session_manager = Arc::new(LocalSessionManager::default());

    StreamableHttpService::new(
        move || Ok::<_, std::io::Error>(GatewayMcpServer::new(state.clone())),
        session_manager,
        StreamableHttpServerConfig {
            stateful_mode: true,
            sse_keep_alive: Some(SSE_KEEP_ALIVE),
            ..Default::default()
        },
    )
}

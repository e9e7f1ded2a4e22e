//! agent-gateway: HTTP gateway for agent tooling
//!
//! Mounts the tools, screenshot, and mcp route groups under `/api` and
//! starts the HTTP listener. With `--stdio` the MCP server is served over
//! stdio instead, for clients that spawn the gateway as a subprocess.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use rmcp::{ServiceExt, transport::stdio};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use agent_gateway::{config::Settings, mcp::GatewayMcpServer, server, state::AppState};

#[derive(Parser)]
#[command(name = "agent-gateway")]
#[command(about = "HTTP gateway exposing agent tooling: tools, screenshot capture, and MCP")]
struct Cli {
    /// Serve the MCP server over stdio instead of starting the HTTP listener
    #[arg(long)]
    stdio: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::new()?;

    // Initialize logging
    // Respects RUST_LOG; the debug setting raises the default level
    let default_filter = if settings.server.debug {
        "agent_gateway=debug"
    } else {
        "agent_gateway=info"
    };
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();

    info!("agent-gateway starting...");

    let state = Arc::new(AppState::with_mock());

    if cli.stdio {
        info!("Transport: stdio");

        let service = GatewayMcpServer::new(state).serve(stdio()).await?;
        service.waiting().await?;

        info!("agent-gateway shutting down");
        return Ok(());
    }

    server::run(&settings, state).await
}

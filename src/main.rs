use anyhow::{Context, Result};
use sarvam_mcp::config::{Config, Transport};
use sarvam_mcp::mcp::McpServer;
use sarvam_mcp::provider::SarvamClient;
use sarvam_mcp::server;
use sarvam_mcp::tools::ToolRegistry;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when the variables come from the host)
    let _ = dotenvy::dotenv();

    // stdout carries the protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sarvam_mcp=info".parse()?),
        )
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    info!("Starting Sarvam MCP server with {:?}", config);

    let client = SarvamClient::from_config(&config).context("Failed to build Sarvam HTTP client")?;
    let registry = ToolRegistry::with_sarvam_tools(Arc::new(client));
    info!("Registered tools: {}", registry.tool_names().join(", "));

    let server = Arc::new(McpServer::new(Arc::new(registry)));

    match config.transport {
        Transport::Stdio => server::serve_stdio(server).await?,
        Transport::Http => {
            let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
                .await
                .with_context(|| format!("Failed to bind port {}", config.port))?;
            server::serve_http(server, listener).await?
        }
    }

    Ok(())
}

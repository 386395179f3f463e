//! Transports: newline-delimited JSON-RPC over stdio, or JSON-RPC over HTTP.

use crate::mcp::McpServer;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Serve MCP on the process's stdin/stdout until stdin closes.
pub async fn serve_stdio(server: Arc<McpServer>) -> std::io::Result<()> {
    info!("Serving MCP over stdio");
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    serve_lines(&server, stdin, stdout).await
}

/// One JSON-RPC message per line in, one response per line out.
///
/// Requests are handled in arrival order. Blank lines are skipped.
pub async fn serve_lines<R, W>(server: &McpServer, reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some(response) = server.handle_message(line).await else {
            continue;
        };

        match serde_json::to_string(&response) {
            Ok(mut payload) => {
                payload.push('\n');
                writer.write_all(payload.as_bytes()).await?;
                writer.flush().await?;
            }
            Err(e) => error!("Failed to serialize JSON-RPC response: {}", e),
        }
    }

    info!("stdin closed, shutting down");
    Ok(())
}

/// HTTP routes: `POST /mcp` for JSON-RPC, `GET /health` for liveness.
pub fn router(server: Arc<McpServer>) -> Router {
    Router::new()
        .route("/mcp", post(handle_rpc))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(server)
}

/// Serve MCP over HTTP on an already-bound listener.
pub async fn serve_http(server: Arc<McpServer>, listener: TcpListener) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("Serving MCP over HTTP on {}", addr);
    }
    axum::serve(listener, router(server)).await
}

async fn handle_rpc(State(server): State<Arc<McpServer>>, body: String) -> Response {
    match server.handle_message(&body).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

async fn health(State(server): State<Arc<McpServer>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "tools": server.registry().len(),
    }))
}

//! MCP protocol layer: JSON-RPC 2.0 envelopes and method routing.
//!
//! Transport-agnostic. A transport hands each raw message to
//! [`McpServer::handle_message`] and writes back whatever response it returns;
//! notifications produce no response.

use crate::error::ToolError;
use crate::tools::{ToolDescriptor, ToolRegistry};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const PROTOCOL_VERSION: &str = "2025-06-18";
pub const SERVER_NAME: &str = "mcp-sarvam";

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

/// Incoming JSON-RPC message. A missing `id` marks a notification; an
/// explicit `"id": null` is kept as `Some(Value::Null)` and rejected.
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    pub jsonrpc: String,
    #[serde(default, deserialize_with = "present_id")]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

fn present_id<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl JsonRpcResponse {
    fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    fn failure(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ToolCallParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

#[derive(Debug, Serialize)]
struct ToolListResult {
    tools: Vec<ToolDescriptor>,
}

/// Result of `tools/call`. Tool failures are reported here with
/// `isError: true` rather than as JSON-RPC errors.
#[derive(Debug, Serialize)]
struct CallToolResult {
    content: Vec<TextContent>,
    #[serde(rename = "isError")]
    is_error: bool,
    #[serde(rename = "structuredContent", skip_serializing_if = "Option::is_none")]
    structured_content: Option<Value>,
}

#[derive(Debug, Serialize)]
struct TextContent {
    #[serde(rename = "type")]
    kind: &'static str,
    text: String,
}

impl CallToolResult {
    fn text(text: String) -> Self {
        Self {
            content: vec![TextContent { kind: "text", text }],
            is_error: false,
            structured_content: None,
        }
    }

    fn tool_error(err: &ToolError) -> Self {
        let mut error = json!({
            "kind": err.kind().as_str(),
            "message": err.to_string(),
        });
        if let Some(field) = err.field() {
            error["field"] = json!(field);
        }

        Self {
            content: vec![TextContent {
                kind: "text",
                text: format!("Error running tool: {}", err),
            }],
            is_error: true,
            structured_content: Some(json!({ "error": error })),
        }
    }
}

/// Routes MCP methods to the tool registry
pub struct McpServer {
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Parse and handle one raw JSON-RPC message.
    ///
    /// Text that is not JSON gets `PARSE_ERROR`; JSON that is not a request
    /// object gets `INVALID_REQUEST`, echoing its `id` when one is present.
    pub async fn handle_message(&self, raw: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("Rejecting unparseable JSON-RPC message: {}", e);
                return Some(JsonRpcResponse::failure(Value::Null, PARSE_ERROR, "parse error"));
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => {
                warn!("Rejecting malformed JSON-RPC request: {}", e);
                Some(JsonRpcResponse::failure(
                    id,
                    INVALID_REQUEST,
                    "invalid json-rpc request",
                ))
            }
        }
    }

    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id else {
            if request.jsonrpc != "2.0" {
                warn!(
                    "Ignoring notification {} with json-rpc version '{}'",
                    request.method, request.jsonrpc
                );
            } else {
                debug!("Received notification: {}", request.method);
            }
            return None;
        };

        if id.is_null() {
            return Some(JsonRpcResponse::failure(
                id,
                INVALID_REQUEST,
                "request id must not be null",
            ));
        }

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::failure(
                id,
                INVALID_REQUEST,
                "invalid json-rpc version",
            ));
        }

        debug!("Handling {} (id {})", request.method, id);

        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(id, self.initialize_result()),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => self.list_tools(id),
            "tools/call" => self.call_tool(id, request.params).await,
            other => {
                warn!("Method not found: {}", other);
                JsonRpcResponse::failure(id, METHOD_NOT_FOUND, "method not found")
            }
        };

        Some(response)
    }

    fn initialize_result(&self) -> Value {
        info!("Initializing MCP session");
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": { "listChanged": false }
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            }
        })
    }

    fn list_tools(&self, id: Value) -> JsonRpcResponse {
        debug!("Listing all available tools");
        let result = ToolListResult {
            tools: self.registry.list_all(),
        };
        encode(id, &result)
    }

    async fn call_tool(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let call = match params.map(serde_json::from_value::<ToolCallParams>) {
            Some(Ok(call)) => call,
            _ => return JsonRpcResponse::failure(id, INVALID_PARAMS, "invalid tool params"),
        };

        let result = match self.registry.invoke(&call.name, call.arguments.as_ref()).await {
            Ok(text) => CallToolResult::text(text),
            Err(err) => CallToolResult::tool_error(&err),
        };
        encode(id, &result)
    }
}

fn encode<T: Serialize>(id: Value, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(_) => JsonRpcResponse::failure(id, INTERNAL_ERROR, "serialization failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::SarvamClient;
    use std::time::Duration;

    fn create_server() -> McpServer {
        let client =
            SarvamClient::new("http://127.0.0.1:9/", "key", Duration::from_secs(1)).unwrap();
        McpServer::new(Arc::new(ToolRegistry::with_sarvam_tools(Arc::new(client))))
    }

    async fn call(server: &McpServer, message: Value) -> JsonRpcResponse {
        server
            .handle_message(&message.to_string())
            .await
            .expect("request should produce a response")
    }

    // ==================== Envelope Tests ====================

    #[tokio::test]
    async fn test_parse_error() {
        let server = create_server();
        let response = server.handle_message("{not json").await.unwrap();

        assert_eq!(response.id, Value::Null);
        assert_eq!(response.error.unwrap().code, PARSE_ERROR);
    }

    #[tokio::test]
    async fn test_valid_json_without_method_is_invalid_request() {
        let server = create_server();
        let response = server
            .handle_message(r#"{"jsonrpc":"2.0","id":7}"#)
            .await
            .unwrap();

        assert_eq!(response.id, json!(7));
        assert_eq!(response.error.unwrap().code, INVALID_REQUEST);
    }

    #[tokio::test]
    async fn test_non_string_method_is_invalid_request() {
        let server = create_server();
        let response = call(&server, json!({"jsonrpc": "2.0", "id": "a", "method": 5})).await;

        assert_eq!(response.id, json!("a"));
        assert_eq!(response.error.unwrap().code, INVALID_REQUEST);
    }

    #[tokio::test]
    async fn test_batch_array_is_invalid_request() {
        let server = create_server();
        let response = server
            .handle_message(r#"[{"jsonrpc":"2.0","id":1,"method":"ping"}]"#)
            .await
            .unwrap();

        assert_eq!(response.id, Value::Null);
        assert_eq!(response.error.unwrap().code, INVALID_REQUEST);
    }

    #[tokio::test]
    async fn test_null_id_is_answered_not_dropped() {
        let server = create_server();
        let response = server
            .handle_message(r#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#)
            .await
            .expect("a null id is a request, not a notification");

        assert_eq!(response.id, Value::Null);
        assert_eq!(response.error.unwrap().code, INVALID_REQUEST);
    }

    #[tokio::test]
    async fn test_notification_with_wrong_version_has_no_response() {
        let server = create_server();
        let response = server
            .handle_message(r#"{"jsonrpc":"1.0","method":"notifications/initialized"}"#)
            .await;

        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_wrong_version() {
        let server = create_server();
        let response = call(&server, json!({"jsonrpc": "1.0", "id": 1, "method": "ping"})).await;

        assert_eq!(response.error.unwrap().code, INVALID_REQUEST);
    }

    #[tokio::test]
    async fn test_notification_has_no_response() {
        let server = create_server();
        let response = server
            .handle_message(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;

        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let server = create_server();
        let request = json!({"jsonrpc": "2.0", "id": 3, "method": "resources/list"});
        let response = call(&server, request).await;

        assert_eq!(response.id, json!(3));
        assert_eq!(response.error.unwrap().code, METHOD_NOT_FOUND);
    }

    // ==================== Method Tests ====================

    #[tokio::test]
    async fn test_initialize() {
        let server = create_server();
        let request = json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}});
        let response = call(&server, request).await;
        let result = response.result.unwrap();

        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(result["serverInfo"]["name"], SERVER_NAME);
        assert!(result["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn test_ping() {
        let server = create_server();
        let response = call(&server, json!({"jsonrpc": "2.0", "id": "p", "method": "ping"})).await;

        assert_eq!(response.id, json!("p"));
        assert_eq!(response.result, Some(json!({})));
    }

    #[tokio::test]
    async fn test_tools_list() {
        let server = create_server();
        let request = json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"});
        let response = call(&server, request).await;
        let tools = response.result.unwrap()["tools"].as_array().unwrap().clone();

        assert_eq!(tools.len(), 3);
        assert_eq!(tools[0]["name"], "translate_text");
        assert_eq!(tools[1]["name"], "identify_language");
        assert_eq!(tools[2]["name"], "transliterate_text");
        assert!(tools[0]["inputSchema"]["properties"]["target_language"]["enum"].is_array());
    }

    #[tokio::test]
    async fn test_tools_call_without_params() {
        let server = create_server();
        let request = json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call"});
        let response = call(&server, request).await;

        assert_eq!(response.error.unwrap().code, INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_tools_call_unknown_tool_is_error_result() {
        let server = create_server();
        let response = call(
            &server,
            json!({
                "jsonrpc": "2.0",
                "id": 5,
                "method": "tools/call",
                "params": {"name": "summarize", "arguments": {}}
            }),
        )
        .await;
        let result = response.result.unwrap();

        assert_eq!(result["isError"], true);
        assert!(result["content"][0]["text"].as_str().unwrap().contains("Unknown tool: summarize"));
        assert_eq!(result["structuredContent"]["error"]["kind"], "unknown_tool");
    }

    #[tokio::test]
    async fn test_tools_call_validation_error_names_field() {
        let server = create_server();
        let response = call(
            &server,
            json!({
                "jsonrpc": "2.0",
                "id": 6,
                "method": "tools/call",
                "params": {
                    "name": "translate_text",
                    "arguments": {"text": "Hello", "target_language": "HINDI", "mode": "LOUD"}
                }
            }),
        )
        .await;
        let error = &response.result.unwrap()["structuredContent"]["error"];

        assert_eq!(error["kind"], "invalid_argument");
        assert_eq!(error["field"], "mode");
    }
}

// ABOUTME: Generic MCP stdio server driving a ToolSet through the JSON-RPC dispatch
// ABOUTME: Line-delimited transport; logging stays on stderr so stdout carries only protocol frames
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 whoop-ynab-mcp contributors

use anyhow::Context;
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};

use crate::errors::{AppError, AppResult};

use super::protocol::{error_codes, McpRequest, McpResponse};
use super::schema::{InitializeResponse, ToolCallParams, ToolResponse, ToolSchema};

/// The seam between the protocol loop and a concrete adapter.
///
/// Implementations own their API client and map tool names to calls. A tool
/// returns the response body as a string (pretty-printed JSON by
/// convention); failures become `isError` tool responses, never
/// protocol-level errors, so the model can read and react to them.
#[async_trait]
pub trait ToolSet: Send + Sync {
    /// Name advertised in the initialize handshake
    fn server_name(&self) -> &str;

    /// Tools advertised through `tools/list`
    fn tools(&self) -> Vec<ToolSchema>;

    /// Execute one tool call
    async fn call_tool(&self, name: &str, args: &Value) -> AppResult<String>;
}

/// MCP server running a [`ToolSet`] over the stdio transport
pub struct McpServer<T: ToolSet> {
    tool_set: T,
}

impl<T: ToolSet> McpServer<T> {
    /// Wrap a tool set for serving
    #[must_use]
    pub fn new(tool_set: T) -> Self {
        Self { tool_set }
    }

    /// Serve line-delimited JSON-RPC on stdin/stdout until stdin closes.
    ///
    /// Unparseable lines are logged and skipped rather than tearing down
    /// the transport. Notifications (no `id`) get no response.
    ///
    /// # Errors
    /// Returns an error only when stdout becomes unwritable.
    pub async fn run_stdio(&self) -> anyhow::Result<()> {
        use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

        info!(
            "{} MCP server listening on stdio",
            self.tool_set.server_name()
        );

        let stdin = tokio::io::stdin();
        let mut stdout = tokio::io::stdout();
        let mut reader = BufReader::new(stdin);
        let mut line = String::new();

        while reader.read_line(&mut line).await.unwrap_or(0) > 0 {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                line.clear();
                continue;
            }

            let request = match serde_json::from_str::<McpRequest>(trimmed) {
                Ok(request) => request,
                Err(e) => {
                    warn!("skipping unparseable frame: {e}");
                    line.clear();
                    continue;
                }
            };

            if let Some(response) = self.handle_request(request).await {
                let frame = match serde_json::to_string(&response) {
                    Ok(frame) => frame,
                    Err(e) => {
                        error!("failed to serialize response: {e}");
                        line.clear();
                        continue;
                    }
                };
                stdout
                    .write_all(frame.as_bytes())
                    .await
                    .context("failed to write to stdout")?;
                stdout
                    .write_all(b"\n")
                    .await
                    .context("failed to write to stdout")?;
                stdout.flush().await.context("failed to flush stdout")?;
            }
            line.clear();
        }

        info!("stdin closed, shutting down");
        Ok(())
    }

    /// Dispatch one request. `None` for notifications.
    pub async fn handle_request(&self, request: McpRequest) -> Option<McpResponse> {
        let Some(id) = request.id else {
            debug!("notification received: {}", request.method);
            return None;
        };

        debug!("handling {} request", request.method);
        let response = match request.method.as_str() {
            "initialize" => McpResponse::success(
                id,
                json!(InitializeResponse::for_server(self.tool_set.server_name())),
            ),
            "ping" => McpResponse::success(id, json!({})),
            "tools/list" => McpResponse::success(id, json!({ "tools": self.tool_set.tools() })),
            "tools/call" => self.handle_tool_call(id, request.params).await,
            other => McpResponse::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("unknown method: {other}"),
            ),
        };
        Some(response)
    }

    async fn handle_tool_call(&self, id: Value, params: Option<Value>) -> McpResponse {
        let params: ToolCallParams = match params
            .ok_or_else(|| "missing params".to_owned())
            .and_then(|p| serde_json::from_value(p).map_err(|e| e.to_string()))
        {
            Ok(params) => params,
            Err(detail) => {
                return McpResponse::error(id, error_codes::INVALID_PARAMS, detail);
            }
        };

        let args = params.arguments.unwrap_or_else(|| json!({}));
        let result = match self.tool_set.call_tool(&params.name, &args).await {
            Ok(body) => ToolResponse::text(body),
            Err(AppError::UnknownTool(name)) => {
                return McpResponse::error(
                    id,
                    error_codes::METHOD_NOT_FOUND,
                    format!("unknown tool: {name}"),
                );
            }
            Err(e) => {
                warn!("tool {} failed: {e}", params.name);
                ToolResponse::error(e)
            }
        };

        McpResponse::success(id, json!(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoTools;

    #[async_trait]
    impl ToolSet for EchoTools {
        fn server_name(&self) -> &str {
            "echo"
        }

        fn tools(&self) -> Vec<ToolSchema> {
            vec![ToolSchema {
                name: "echo".to_owned(),
                description: "Echo the message argument".to_owned(),
                input_schema: json!({"type": "object", "properties": {"message": {"type": "string"}}}),
            }]
        }

        async fn call_tool(&self, name: &str, args: &Value) -> AppResult<String> {
            match name {
                "echo" => Ok(args["message"].as_str().unwrap_or_default().to_owned()),
                "fail" => Err(AppError::config("deliberate failure")),
                other => Err(AppError::UnknownTool(other.to_owned())),
            }
        }
    }

    fn request(method: &str, params: Value, id: Value) -> McpRequest {
        serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": id,
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_initialize_returns_server_info() {
        let server = McpServer::new(EchoTools);
        let response = server
            .handle_request(request("initialize", json!({}), json!(1)))
            .await
            .unwrap();
        let result = serde_json::to_value(&response).unwrap();
        assert_eq!(result["result"]["serverInfo"]["name"], "echo");
        assert!(result["result"]["protocolVersion"].is_string());
    }

    #[tokio::test]
    async fn test_tools_list_advertises_schemas() {
        let server = McpServer::new(EchoTools);
        let response = server
            .handle_request(request("tools/list", json!({}), json!(2)))
            .await
            .unwrap();
        let result = serde_json::to_value(&response).unwrap();
        assert_eq!(result["result"]["tools"][0]["name"], "echo");
        assert!(result["result"]["tools"][0]["inputSchema"].is_object());
    }

    #[tokio::test]
    async fn test_tool_call_success() {
        let server = McpServer::new(EchoTools);
        let params = json!({"name": "echo", "arguments": {"message": "hi"}});
        let response = server
            .handle_request(request("tools/call", params, json!(3)))
            .await
            .unwrap();
        let result = serde_json::to_value(&response).unwrap();
        assert_eq!(result["result"]["isError"], false);
        assert_eq!(result["result"]["content"][0]["text"], "hi");
    }

    #[tokio::test]
    async fn test_tool_failure_becomes_is_error_response() {
        let server = McpServer::new(EchoTools);
        let params = json!({"name": "fail", "arguments": {}});
        let response = server
            .handle_request(request("tools/call", params, json!(4)))
            .await
            .unwrap();
        let result = serde_json::to_value(&response).unwrap();
        assert_eq!(result["result"]["isError"], true);
        let text = result["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.starts_with("Error: "));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_protocol_error() {
        let server = McpServer::new(EchoTools);
        let params = json!({"name": "nope", "arguments": {}});
        let response = server
            .handle_request(request("tools/call", params, json!(5)))
            .await
            .unwrap();
        let result = serde_json::to_value(&response).unwrap();
        assert_eq!(result["error"]["code"], error_codes::METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_method_is_method_not_found() {
        let server = McpServer::new(EchoTools);
        let response = server
            .handle_request(request("resources/list", json!({}), json!(6)))
            .await
            .unwrap();
        let result = serde_json::to_value(&response).unwrap();
        assert_eq!(result["error"]["code"], error_codes::METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_notification_gets_no_response() {
        let server = McpServer::new(EchoTools);
        let request: McpRequest = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "method": "notifications/initialized",
        }))
        .unwrap();
        assert!(server.handle_request(request).await.is_none());
    }
}

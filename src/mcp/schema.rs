// ABOUTME: MCP message payloads exchanged over the JSON-RPC transport
// ABOUTME: Tool schema advertisements, tool responses, and the initialize handshake result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 whoop-ynab-mcp contributors

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::protocol;

/// A tool advertised through `tools/list`.
///
/// `input_schema` stays a raw JSON Schema value: the schemas mirror what
/// clients expect verbatim, and a typed schema builder buys nothing here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Tool name, e.g. `whoop_get_overview`
    pub name: String,
    /// Human-readable description shown to the model
    pub description: String,
    /// JSON Schema for the tool's arguments
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Result payload for `tools/call`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResponse {
    /// Content blocks, in order
    pub content: Vec<Content>,
    /// Whether the call failed; failed calls still return a result so the
    /// model sees the error text instead of a protocol-level fault
    #[serde(rename = "isError")]
    pub is_error: bool,
}

impl ToolResponse {
    /// A successful single-text response
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![Content::Text { text: text.into() }],
            is_error: false,
        }
    }

    /// A failed response carrying `Error: <message>` as text
    #[must_use]
    pub fn error(message: impl std::fmt::Display) -> Self {
        Self {
            content: vec![Content::Text {
                text: format!("Error: {message}"),
            }],
            is_error: true,
        }
    }
}

/// Content block types
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Content {
    /// Plain text content
    #[serde(rename = "text")]
    Text {
        /// The text body
        text: String,
    },
}

/// Result payload for `initialize`
#[derive(Debug, Clone, Serialize)]
pub struct InitializeResponse {
    /// Negotiated protocol version
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    /// Advertised capabilities
    pub capabilities: ServerCapabilities,
    /// Identity of this server
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

impl InitializeResponse {
    /// Handshake response for a tools-only server
    #[must_use]
    pub fn for_server(name: impl Into<String>) -> Self {
        Self {
            protocol_version: protocol::MCP_PROTOCOL_VERSION.to_owned(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {},
            },
            server_info: ServerInfo {
                name: name.into(),
                version: protocol::SERVER_VERSION.to_owned(),
            },
        }
    }
}

/// Capabilities advertised during initialize
#[derive(Debug, Clone, Serialize)]
pub struct ServerCapabilities {
    /// Tools capability (presence signals support)
    pub tools: ToolsCapability,
}

/// Marker object for the tools capability
#[derive(Debug, Clone, Serialize)]
pub struct ToolsCapability {}

/// Server identity
#[derive(Debug, Clone, Serialize)]
pub struct ServerInfo {
    /// Server name
    pub name: String,
    /// Server version
    pub version: String,
}

/// Parameters of a `tools/call` request
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallParams {
    /// Tool to invoke
    pub name: String,
    /// Tool arguments, `{}` when absent
    #[serde(default)]
    pub arguments: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_response_error_prefixes_message() {
        let response = ToolResponse::error("boom");
        assert!(response.is_error);
        let Content::Text { text } = &response.content[0];
        assert_eq!(text, "Error: boom");
    }

    #[test]
    fn test_content_serializes_with_type_tag() {
        let wire = serde_json::to_value(Content::Text {
            text: "hello".to_owned(),
        })
        .unwrap();
        assert_eq!(wire["type"], "text");
        assert_eq!(wire["text"], "hello");
    }

    #[test]
    fn test_initialize_response_uses_camel_case() {
        let wire =
            serde_json::to_value(InitializeResponse::for_server("whoop-mcp")).unwrap();
        assert!(wire.get("protocolVersion").is_some());
        assert_eq!(wire["serverInfo"]["name"], "whoop-mcp");
        assert!(wire["capabilities"].get("tools").is_some());
    }
}

// ABOUTME: Model Context Protocol server over stdio with line-delimited JSON-RPC 2.0
// ABOUTME: Protocol types, tool schemas, and the transport loop shared by both adapter binaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 whoop-ynab-mcp contributors

/// JSON-RPC 2.0 request and response envelopes
pub mod protocol;

/// MCP message payloads (tool schemas, tool responses, initialize result)
pub mod schema;

/// The stdio server loop and the `ToolSet` seam that binaries implement
pub mod server;

pub use server::{McpServer, ToolSet};

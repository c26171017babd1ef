// ABOUTME: Typed resource clients for the third-party APIs exposed as MCP tools
// ABOUTME: WHOOP (OAuth2 refresh-token session) and YNAB (static personal access token)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 whoop-ynab-mcp contributors

/// WHOOP developer API client
pub mod whoop;

/// YNAB API v1 client
pub mod ynab;

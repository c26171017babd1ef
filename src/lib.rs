// ABOUTME: Library root for the WHOOP and YNAB MCP adapter servers
// ABOUTME: Exposes the OAuth2 session core, provider clients, tools, and MCP transport
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 whoop-ynab-mcp contributors

//! # whoop-ynab-mcp
//!
//! Two small MCP (Model Context Protocol) servers exposing the WHOOP fitness
//! API and the YNAB budgeting API as tool-call endpoints over stdio.
//!
//! The heart of the crate is [`auth`]: an authenticated-session HTTP client
//! that keeps a short-lived OAuth2 access token valid across concurrent
//! requests via a refresh-token grant, refreshing proactively before expiry
//! and reactively after a 401, so callers see an interface indistinguishable
//! from a client holding a permanently valid token.
//!
//! Everything else is plumbing around that core: typed resource clients for
//! WHOOP and YNAB ([`providers`]), JSON reshaping of API responses into
//! tool output ([`tools`]), and the stdio JSON-RPC transport ([`mcp`]).

/// OAuth2 session state, refresh-token grant, and the authenticated executor
pub mod auth;

/// Environment-variable configuration with fail-fast validation
pub mod config;

/// Provider names, endpoint URLs, and protocol constants
pub mod constants;

/// Unified error type and result alias
pub mod errors;

/// Structured logging setup (stderr only - stdout carries MCP frames)
pub mod logging;

/// MCP protocol types and the stdio server loop
pub mod mcp;

/// Typed resource clients for WHOOP and YNAB
pub mod providers;

/// Tool implementations backing `tools/call`
pub mod tools;

// ABOUTME: OAuth2 refresh-token session core shared by token-authenticated providers
// ABOUTME: Splits the lifecycle into token store, refresher, and request executor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 whoop-ynab-mcp contributors

//! # Authenticated-session HTTP client
//!
//! A reusable pattern for REST APIs that require a short-lived bearer token
//! obtained via a refresh-token exchange. Three pieces:
//!
//! - [`session`]: the token store - current access token, its expiry
//!   instant, and the refresh credential. Pure state, no I/O.
//! - [`refresh`]: the refresher - one POST to the authorization endpoint
//!   exchanging the refresh token for a new access token.
//! - [`client`]: the executor - wraps outbound calls, refreshing
//!   proactively when the stored token is inside the safety margin and
//!   reactively (exactly once) when the server answers 401 anyway.
//!
//! Callers see an interface indistinguishable from a client holding a
//! permanently valid token.

/// Authenticated request executor with lazy refresh and retry-on-401
pub mod client;

/// Refresh-token grant exchange
pub mod refresh;

/// Session state: credentials, access token, expiry
pub mod session;

pub use client::OAuthClient;
pub use refresh::{TokenGrant, TokenRefresher};
pub use session::{Credentials, TokenSession};

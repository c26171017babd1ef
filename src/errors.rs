// ABOUTME: Unified error handling for configuration, OAuth refresh, and API requests
// ABOUTME: Defines the AppError taxonomy and AppResult alias used across all modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 whoop-ynab-mcp contributors

//! # Unified Error Handling
//!
//! One error type for the whole crate. The variants follow the failure
//! surface of the adapter servers: startup configuration, the refresh-token
//! exchange, authenticated resource calls, and tool invocation.
//!
//! Propagation policy: nothing is recovered locally beyond the executor's
//! single 401 retry. Everything else bubbles to the caller, which renders a
//! user-visible message (the MCP layer turns it into an `isError` tool
//! response).

use thiserror::Error;

/// Unified error type for the adapter servers
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or empty required configuration; fatal at startup
    #[error("configuration error: {0}")]
    Config(String),

    /// The refresh-token exchange failed (network or non-2xx).
    /// The session keeps its last-known token; a clear would not change
    /// retry behavior and loses debugging context.
    #[error("{provider} token refresh failed: {detail}")]
    AuthRefresh {
        /// Provider whose authorization server rejected the exchange
        provider: String,
        /// Provider-supplied error payload or transport message
        detail: String,
    },

    /// Non-401 failure from a resource endpoint, propagated verbatim
    #[error("{provider} API request failed with status {status}: {detail}")]
    ApiRequest {
        /// Provider whose resource server failed the request
        provider: String,
        /// HTTP status code
        status: u16,
        /// Provider-supplied detail where available
        detail: String,
    },

    /// The post-refresh retry also returned 401; terminal for that call
    #[error("{provider} rejected the refreshed access token (401 after retry)")]
    UnauthorizedRetryExhausted {
        /// Provider that rejected the refreshed token
        provider: String,
    },

    /// Transport-level failure before any response arrived
    #[error("{provider} request failed: {source}")]
    Http {
        /// Provider the request was addressed to
        provider: String,
        /// Underlying reqwest error
        #[source]
        source: reqwest::Error,
    },

    /// A 2xx response whose body did not match the expected shape
    #[error("failed to parse {provider} response: {detail}")]
    InvalidResponse {
        /// Provider that produced the unparseable body
        provider: String,
        /// Decode error detail
        detail: String,
    },

    /// Tool arguments failed validation
    #[error("invalid tool arguments: {0}")]
    InvalidArguments(String),

    /// `tools/call` named a tool this server does not provide
    #[error("unknown tool: {0}")]
    UnknownTool(String),
}

impl AppError {
    /// Missing/empty required credential
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Refresh exchange failure with provider detail
    pub fn auth_refresh(provider: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::AuthRefresh {
            provider: provider.into(),
            detail: detail.into(),
        }
    }

    /// Non-401 resource endpoint failure
    pub fn api_request(
        provider: impl Into<String>,
        status: u16,
        detail: impl Into<String>,
    ) -> Self {
        Self::ApiRequest {
            provider: provider.into(),
            status,
            detail: detail.into(),
        }
    }

    /// Invalid tool arguments
    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::InvalidArguments(message.into())
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_provider_detail() {
        let err = AppError::api_request("whoop", 503, "upstream unavailable");
        let msg = err.to_string();
        assert!(msg.contains("whoop"));
        assert!(msg.contains("503"));
        assert!(msg.contains("upstream unavailable"));
    }

    #[test]
    fn test_auth_refresh_error_carries_payload() {
        let err = AppError::auth_refresh("whoop", r#"{"error":"invalid_grant"}"#);
        assert!(err.to_string().contains("invalid_grant"));
    }

    #[test]
    fn test_retry_exhausted_is_terminal_message() {
        let err = AppError::UnauthorizedRetryExhausted {
            provider: "whoop".to_owned(),
        };
        assert!(err.to_string().contains("401 after retry"));
    }
}

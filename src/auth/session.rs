// ABOUTME: Token store holding the current access token, expiry instant, and refresh credential
// ABOUTME: Pure state container with no I/O; mutated only when a refresh completes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 whoop-ynab-mcp contributors

use chrono::{DateTime, Duration, Utc};

/// OAuth2 client credentials plus the current refresh token.
///
/// `client_id` and `client_secret` are immutable after construction;
/// `refresh_token` is replaced when the authorization server rotates it.
/// One instance is owned exclusively by one client; never shared.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// OAuth client ID
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Current refresh token
    pub refresh_token: String,
}

/// The current access token and the instant after which it must be treated
/// as invalid.
///
/// Created empty at client construction; updated only by a completed
/// refresh. The session does not distinguish "expired" from "about to
/// expire within the safety margin" - both fail `is_valid`.
#[derive(Debug, Clone)]
pub struct TokenSession {
    access_token: Option<String>,
    expires_at: DateTime<Utc>,
}

impl TokenSession {
    /// Create an empty session with no token
    #[must_use]
    pub fn new() -> Self {
        Self {
            access_token: None,
            expires_at: DateTime::<Utc>::MIN_UTC,
        }
    }

    /// Whether the stored token can still be presented to the resource
    /// server. False when no token has ever been set, or when `now` has
    /// reached `expires_at - margin`.
    #[must_use]
    pub fn is_valid(&self, now: DateTime<Utc>, margin: Duration) -> bool {
        self.access_token.is_some() && now < self.expires_at - margin
    }

    /// The current access token, if any
    #[must_use]
    pub fn current_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Install a freshly granted token. `expires_in` is relative; the
    /// absolute expiry is computed from the single `now` reading taken when
    /// the grant was received, not at request-send time.
    pub fn update(&mut self, access_token: String, expires_in_secs: i64, now: DateTime<Utc>) {
        self.access_token = Some(access_token);
        self.expires_at = now + Duration::seconds(expires_in_secs);
    }

    /// The instant after which the token is invalid
    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

impl Default for TokenSession {
    fn default() -> Self {
        Self::new()
    }
}

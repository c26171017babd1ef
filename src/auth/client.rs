// ABOUTME: Authenticated request executor with lazy token refresh and one retry on 401
// ABOUTME: Serializes refreshes behind a mutex so concurrent callers never race the token store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 whoop-ynab-mcp contributors

//! The state machine governing when to refresh and how to recover from a
//! mid-flight authentication failure.
//!
//! Two independent refresh triggers keep both latency and failure rate low:
//! proactive (the stored expiry is inside the safety margin) and reactive
//! (the server answers 401 despite a token we believed valid, e.g.
//! server-side revocation or clock skew). The reactive path runs at most
//! once per logical call.

use chrono::{Duration, Utc};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::constants::DEFAULT_TOKEN_SAFETY_MARGIN_SECS;
use crate::errors::{AppError, AppResult};

use super::refresh::TokenRefresher;
use super::session::{Credentials, TokenSession};

struct AuthState {
    credentials: Credentials,
    session: TokenSession,
}

/// HTTP client for bearer-token APIs whose token must be kept fresh via a
/// refresh-token grant.
///
/// All session mutation happens under one async mutex, held across the
/// refresh await. Two tasks discovering an invalid token concurrently
/// therefore serialize: the second waits for the first's refresh and then
/// observes the new token instead of issuing an overlapping exchange that
/// could clobber a rotated refresh token with a stale one.
pub struct OAuthClient {
    provider: String,
    http: Client,
    refresher: TokenRefresher,
    safety_margin: Duration,
    state: Mutex<AuthState>,
}

impl OAuthClient {
    /// Create an executor for `provider`, refreshing against `token_url`
    #[must_use]
    pub fn new(
        provider: impl Into<String>,
        token_url: impl Into<String>,
        credentials: Credentials,
    ) -> Self {
        let provider = provider.into();
        let http = Client::new();
        Self {
            refresher: TokenRefresher::new(provider.clone(), http.clone(), token_url),
            provider,
            http,
            safety_margin: Duration::seconds(DEFAULT_TOKEN_SAFETY_MARGIN_SECS),
            state: Mutex::new(AuthState {
                credentials,
                session: TokenSession::new(),
            }),
        }
    }

    /// Override the safety margin. Providers hand out token lifetimes from
    /// minutes to hours, so the 300 s default is not always right.
    #[must_use]
    pub fn with_safety_margin(mut self, secs: i64) -> Self {
        self.safety_margin = Duration::seconds(secs);
        self
    }

    /// Issue an authenticated GET and decode the JSON body.
    ///
    /// Pre-flight: refresh if the stored token is absent or inside the
    /// safety margin. On 401: force one refresh (the server's verdict
    /// overrides the cached expiry) and retry the identical request exactly
    /// once. A second 401 is terminal.
    ///
    /// # Errors
    /// `AuthRefresh` when an exchange fails, `ApiRequest` for non-401 error
    /// statuses, `UnauthorizedRetryExhausted` when the retry is also
    /// rejected, `Http`/`InvalidResponse` for transport and decode failures.
    pub async fn get_json<T>(&self, url: &str, query: &[(&str, String)]) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let token = self.ensure_valid_token().await?;
        let response = self.send(url, query, &token).await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return self.decode(response).await;
        }

        warn!(
            "{} returned 401 for a token believed valid - forcing refresh and retrying once",
            self.provider
        );
        let token = self.recover_after_unauthorized(&token).await?;
        let response = self.send(url, query, &token).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(AppError::UnauthorizedRetryExhausted {
                provider: self.provider.clone(),
            });
        }

        self.decode(response).await
    }

    /// Return a token that passes the validity check, refreshing first if
    /// needed. The lock is held across the refresh so concurrent callers
    /// wait rather than racing.
    async fn ensure_valid_token(&self) -> AppResult<String> {
        let mut state = self.state.lock().await;
        if !state.session.is_valid(Utc::now(), self.safety_margin) {
            Self::refresh_locked(&self.refresher, &mut state).await?;
        }
        current_token(&state)
    }

    /// Reactive path after a 401. If another task already replaced the
    /// token while we waited for the lock, retry with that one instead of
    /// issuing a redundant exchange.
    async fn recover_after_unauthorized(&self, stale_token: &str) -> AppResult<String> {
        let mut state = self.state.lock().await;
        match state.session.current_token() {
            Some(current) if current != stale_token => {
                debug!("{} token already rotated by a concurrent call", self.provider);
            }
            _ => Self::refresh_locked(&self.refresher, &mut state).await?,
        }
        current_token(&state)
    }

    /// Run one refresh and install the result. The session is only mutated
    /// on success; a failed exchange leaves the last-known token in place.
    async fn refresh_locked(refresher: &TokenRefresher, state: &mut AuthState) -> AppResult<()> {
        let grant = refresher.refresh(&state.credentials).await?;
        let now = Utc::now();
        state
            .session
            .update(grant.access_token, grant.expires_in, now);
        if let Some(rotated) = grant.refresh_token {
            state.credentials.refresh_token = rotated;
        }
        Ok(())
    }

    async fn send(&self, url: &str, query: &[(&str, String)], token: &str) -> AppResult<Response> {
        debug!("sending authenticated {} request to {url}", self.provider);
        self.http
            .get(url)
            .query(query)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|source| AppError::Http {
                provider: self.provider.clone(),
                source,
            })
    }

    async fn decode<T>(&self, response: Response) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::api_request(
                &self.provider,
                status.as_u16(),
                body,
            ));
        }

        response.json().await.map_err(|e| AppError::InvalidResponse {
            provider: self.provider.clone(),
            detail: e.to_string(),
        })
    }
}

fn current_token(state: &AuthState) -> AppResult<String> {
    state
        .session
        .current_token()
        .map(str::to_owned)
        .ok_or_else(|| {
            // Unreachable after a successful refresh; kept as a typed error
            // rather than a panic because the executor must never crash the
            // server loop.
            AppError::AuthRefresh {
                provider: "oauth".to_owned(),
                detail: "no access token present after refresh".to_owned(),
            }
        })
}

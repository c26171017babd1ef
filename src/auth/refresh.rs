// ABOUTME: Refresh-token grant exchange against an OAuth2 authorization endpoint
// ABOUTME: Single form-encoded POST; failures carry the provider payload and are never retried here
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 whoop-ynab-mcp contributors

use crate::errors::{AppError, AppResult};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use super::session::Credentials;

/// Wire record returned by the authorization server for a successful
/// refresh-token grant. `refresh_token` is optional: many providers reuse
/// the same refresh token and omit it.
#[derive(Debug, Deserialize)]
pub struct TokenGrant {
    /// New short-lived access token
    pub access_token: String,
    /// Token type, normally `bearer`
    #[serde(default)]
    pub token_type: Option<String>,
    /// Seconds until the access token expires, relative to receipt
    pub expires_in: i64,
    /// Replacement refresh token, when the provider rotates it
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Performs the refresh-token grant exchange.
///
/// Retry policy lives in the executor, not here: a failed exchange is
/// surfaced as [`AppError::AuthRefresh`] to the caller of the triggering
/// operation.
pub struct TokenRefresher {
    provider: String,
    http: Client,
    token_url: String,
}

impl TokenRefresher {
    /// Create a refresher for the given provider's token endpoint
    #[must_use]
    pub fn new(provider: impl Into<String>, http: Client, token_url: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            http,
            token_url: token_url.into(),
        }
    }

    /// Exchange the current refresh token for a new access token.
    ///
    /// # Errors
    /// `AppError::AuthRefresh` on network failure, a non-2xx status, or an
    /// unparseable body. The error carries the provider's payload so it is
    /// never silently collapsed into an empty token (which would cause an
    /// infinite refresh loop upstream).
    pub async fn refresh(&self, credentials: &Credentials) -> AppResult<TokenGrant> {
        info!("refreshing {} access token", self.provider);

        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", credentials.refresh_token.as_str()),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
        ];

        let response = self
            .http
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                AppError::auth_refresh(&self.provider, format!("failed to send request: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::auth_refresh(
                &self.provider,
                format!("token endpoint returned {status}: {body}"),
            ));
        }

        let grant: TokenGrant = response.json().await.map_err(|e| {
            AppError::auth_refresh(&self.provider, format!("failed to parse token response: {e}"))
        })?;

        debug!(
            token_type = grant.token_type.as_deref().unwrap_or("bearer"),
            expires_in = grant.expires_in,
            rotated = grant.refresh_token.is_some(),
            "{} token refresh succeeded",
            self.provider
        );

        Ok(grant)
    }
}

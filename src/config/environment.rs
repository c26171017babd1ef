// ABOUTME: Environment variable configuration loading for WHOOP and YNAB credentials
// ABOUTME: Validates required values as non-empty at startup and fails fast otherwise
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 whoop-ynab-mcp contributors

//! Environment-only configuration. Each binary loads exactly the variables
//! it needs at startup; a missing or empty value is a fatal `Config` error
//! and the process must not proceed.

use crate::auth::Credentials;
use crate::errors::{AppError, AppResult};
use std::env;

/// WHOOP OAuth credentials loaded from the environment
#[derive(Debug, Clone)]
pub struct WhoopEnvConfig {
    /// OAuth client ID from the WHOOP developer portal
    pub client_id: String,
    /// OAuth client secret from the WHOOP developer portal
    pub client_secret: String,
    /// Refresh token obtained via the authorization flow
    pub refresh_token: String,
}

impl WhoopEnvConfig {
    /// Load from `WHOOP_CLIENT_ID`, `WHOOP_CLIENT_SECRET`, `WHOOP_REFRESH_TOKEN`.
    ///
    /// # Errors
    /// Returns `AppError::Config` when any variable is missing or empty.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            client_id: required_env("WHOOP_CLIENT_ID")?,
            client_secret: required_env("WHOOP_CLIENT_SECRET")?,
            refresh_token: required_env("WHOOP_REFRESH_TOKEN")?,
        })
    }

    /// Convert into the credential set consumed by the OAuth executor
    #[must_use]
    pub fn into_credentials(self) -> Credentials {
        Credentials {
            client_id: self.client_id,
            client_secret: self.client_secret,
            refresh_token: self.refresh_token,
        }
    }
}

/// YNAB API settings loaded from the environment
#[derive(Debug, Clone)]
pub struct YnabEnvConfig {
    /// Personal access token from YNAB account settings
    pub access_token: String,
    /// Budget ID from the YNAB URL, or `last-used`
    pub budget_id: String,
}

impl YnabEnvConfig {
    /// Load from `YNAB_ACCESS_TOKEN` and `YNAB_BUDGET_ID`.
    ///
    /// # Errors
    /// Returns `AppError::Config` when any variable is missing or empty.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            access_token: required_env("YNAB_ACCESS_TOKEN")?,
            budget_id: required_env("YNAB_BUDGET_ID")?,
        })
    }
}

/// Read a required variable, treating empty/whitespace-only values as missing
fn required_env(key: &str) -> AppResult<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        Ok(_) => Err(AppError::config(format!("{key} is set but empty"))),
        Err(_) => Err(AppError::config(format!(
            "required environment variable {key} is not set"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env-var tests mutate process state; each uses a distinct key so they
    // can run in parallel without interfering.

    #[test]
    fn test_required_env_present() {
        env::set_var("WY_TEST_PRESENT", "value");
        assert_eq!(required_env("WY_TEST_PRESENT").unwrap(), "value");
        env::remove_var("WY_TEST_PRESENT");
    }

    #[test]
    fn test_required_env_missing() {
        let err = required_env("WY_TEST_MISSING_NEVER_SET").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("WY_TEST_MISSING_NEVER_SET"));
    }

    #[test]
    fn test_required_env_empty_rejected() {
        env::set_var("WY_TEST_EMPTY", "");
        let err = required_env("WY_TEST_EMPTY").unwrap_err();
        assert!(err.to_string().contains("empty"));
        env::remove_var("WY_TEST_EMPTY");
    }

    #[test]
    fn test_required_env_whitespace_rejected() {
        env::set_var("WY_TEST_BLANK", "   ");
        assert!(required_env("WY_TEST_BLANK").is_err());
        env::remove_var("WY_TEST_BLANK");
    }
}

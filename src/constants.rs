// ABOUTME: Centralized constants for provider endpoints and protocol versions
// ABOUTME: Single source of truth for URLs, provider names, and token policy defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 whoop-ynab-mcp contributors

/// Provider identifiers used in logs and error messages
pub mod providers {
    /// WHOOP fitness provider name
    pub const WHOOP: &str = "whoop";
    /// YNAB budgeting provider name
    pub const YNAB: &str = "ynab";
}

/// WHOOP production endpoints
pub mod whoop {
    /// OAuth2 token endpoint (refresh-token grant)
    pub const TOKEN_URL: &str = "https://api.prod.whoop.com/oauth/oauth2/token";
    /// Base URL for developer API calls
    pub const API_BASE_URL: &str = "https://api.prod.whoop.com/developer/v1";
}

/// YNAB production endpoints
pub mod ynab {
    /// Base URL for YNAB API v1
    pub const API_BASE_URL: &str = "https://api.ynab.com/v1";
}

/// Tool names advertised by the adapter servers
pub mod tools {
    /// Daily WHOOP overview across recovery, strain, sleep, and workouts
    pub const WHOOP_GET_OVERVIEW: &str = "whoop_get_overview";
    /// Detailed sleep analysis
    pub const WHOOP_GET_SLEEP: &str = "whoop_get_sleep";
    /// Recovery analysis with 30-day baselines
    pub const WHOOP_GET_RECOVERY: &str = "whoop_get_recovery";
    /// Strain analysis with 30-day baselines
    pub const WHOOP_GET_STRAIN: &str = "whoop_get_strain";
    /// Healthspan placeholder
    pub const WHOOP_GET_HEALTHSPAN: &str = "whoop_get_healthspan";
    /// Budget overview with accounts and category group totals
    pub const YNAB_GET_BUDGET_SUMMARY: &str = "ynab_get_budget_summary";
    /// Per-month category budgeted/activity/balance breakdown
    pub const YNAB_GET_CATEGORY_ACTIVITY: &str = "ynab_get_category_activity";
    /// Recent transactions listing
    pub const YNAB_LIST_RECENT_TRANSACTIONS: &str = "ynab_list_recent_transactions";
    /// Create a new transaction
    pub const YNAB_CREATE_TRANSACTION: &str = "ynab_create_transaction";
}

/// MCP protocol constants
pub mod protocol {
    /// MCP protocol version advertised during `initialize`
    pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";
    /// Server version reported in `serverInfo`
    pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
}

/// Seconds before true expiry at which a token is proactively treated as
/// invalid. Tolerates clock skew and in-flight latency so a token is never
/// presented to the resource server past its real expiry.
pub const DEFAULT_TOKEN_SAFETY_MARGIN_SECS: i64 = 300;

// ABOUTME: Healthspan placeholder tool
// ABOUTME: WHOOP API v1 exposes no healthspan endpoint, so this reports availability instead
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 whoop-ynab-mcp contributors

use chrono::NaiveDate;
use serde_json::json;

use crate::tools::render;

/// Static availability notice; no API call is made
pub fn run(date: NaiveDate) -> String {
    render(&json!({
        "date": date.format("%Y-%m-%d").to_string(),
        "message": "Healthspan/biological age data is not currently available via the WHOOP API v1.",
        "note": "This feature may require WHOOP 4.0+ and may not be exposed in the public API yet.",
        "suggestion": "Use the recovery, sleep, and strain tools to get comprehensive health metrics.",
    }))
}

// ABOUTME: Tool implementations behind the MCP adapter servers
// ABOUTME: Shared argument parsing and rendering helpers plus the per-provider tool sets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 whoop-ynab-mcp contributors

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde_json::Value;

use crate::errors::{AppError, AppResult};

/// WHOOP fitness tools
pub mod whoop;

/// YNAB budgeting tools
pub mod ynab;

pub use whoop::WhoopToolSet;
pub use ynab::YnabToolSet;

/// Pretty-print a JSON value for a tool's text response
pub(crate) fn render(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Parse an optional `YYYY-MM-DD` argument, defaulting to today (UTC)
pub(crate) fn parse_date_arg(args: &Value, key: &str) -> AppResult<NaiveDate> {
    match args.get(key).and_then(Value::as_str) {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
            AppError::invalid_arguments(format!("{key} must be in YYYY-MM-DD format"))
        }),
        None => Ok(Utc::now().date_naive()),
    }
}

/// UTC bounds of a calendar day: `T00:00:00.000Z` through `T23:59:59.999Z`
pub(crate) fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_time(NaiveTime::MIN).and_utc();
    let end = start + Duration::days(1) - Duration::milliseconds(1);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_date_arg_accepts_iso_date() {
        let date = parse_date_arg(&json!({"date": "2024-03-05"}), "date").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn test_parse_date_arg_defaults_to_today() {
        let date = parse_date_arg(&json!({}), "date").unwrap();
        assert_eq!(date, Utc::now().date_naive());
    }

    #[test]
    fn test_parse_date_arg_rejects_garbage() {
        let err = parse_date_arg(&json!({"date": "03/05/2024"}), "date").unwrap_err();
        assert!(err.to_string().contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_day_bounds_cover_the_whole_day() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let (start, end) = day_bounds(date);
        assert_eq!(start.to_rfc3339(), "2024-03-05T00:00:00+00:00");
        assert_eq!(
            end.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            "2024-03-05T23:59:59.999Z"
        );
    }
}

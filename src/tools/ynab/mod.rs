// ABOUTME: YNAB tool set exposing budget summaries, category activity, and transactions over MCP
// ABOUTME: Shared milliunit currency formatting with sign before the symbol
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 whoop-ynab-mcp contributors

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::constants::tools;
use crate::errors::{AppError, AppResult};
use crate::mcp::schema::ToolSchema;
use crate::mcp::ToolSet;
use crate::providers::ynab::YnabClient;

mod budget_summary;
mod category_activity;
mod create_transaction;
mod recent_transactions;

/// The four YNAB tools behind the `ynab-mcp` binary
pub struct YnabToolSet {
    client: YnabClient,
}

impl YnabToolSet {
    /// Wrap a client for serving
    #[must_use]
    pub fn new(client: YnabClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolSet for YnabToolSet {
    fn server_name(&self) -> &str {
        "ynab-mcp"
    }

    fn tools(&self) -> Vec<ToolSchema> {
        vec![
            ToolSchema {
                name: tools::YNAB_GET_BUDGET_SUMMARY.to_owned(),
                description: "Get comprehensive budget overview including account balances, category group totals, and net worth. Returns on-budget and off-budget accounts with current balances.".to_owned(),
                input_schema: json!({
                    "type": "object",
                    "properties": {},
                }),
            },
            ToolSchema {
                name: tools::YNAB_GET_CATEGORY_ACTIVITY.to_owned(),
                description: "Get detailed category budgeted amounts, activity (spending), and balances for a specific month. Shows categories grouped by category groups with totals and goal progress.".to_owned(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "month": {
                            "type": "string",
                            "description": "Month in YYYY-MM-DD format (optional, defaults to current month). Use first day of month (e.g., 2024-01-01 for January 2024).",
                            "pattern": "^\\d{4}-\\d{2}-\\d{2}$",
                        },
                    },
                }),
            },
            ToolSchema {
                name: tools::YNAB_LIST_RECENT_TRANSACTIONS.to_owned(),
                description: "List recent transactions with optional date filter. Returns transaction details including date, payee, category, amount, and cleared status. Sorted by date (most recent first).".to_owned(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "since_date": {
                            "type": "string",
                            "description": "Only return transactions on or after this date in YYYY-MM-DD format (optional)",
                            "pattern": "^\\d{4}-\\d{2}-\\d{2}$",
                        },
                        "limit": {
                            "type": "number",
                            "description": "Maximum number of transactions to return (optional, default: 20)",
                            "minimum": 1,
                            "maximum": 100,
                        },
                    },
                }),
            },
            ToolSchema {
                name: tools::YNAB_CREATE_TRANSACTION.to_owned(),
                description: "Create a new transaction in YNAB. Requires account ID, date, and amount. Amount must be in milliunits (1000 = $1.00). Negative amounts are outflows (expenses), positive amounts are inflows (income).".to_owned(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "account_id": {
                            "type": "string",
                            "description": "Account UUID from YNAB (required)",
                        },
                        "date": {
                            "type": "string",
                            "description": "Transaction date in YYYY-MM-DD format (required)",
                            "pattern": "^\\d{4}-\\d{2}-\\d{2}$",
                        },
                        "amount": {
                            "type": "number",
                            "description": "Amount in milliunits (required). 1000 milliunits = $1.00. Negative for outflows (expenses), positive for inflows (income). Example: -50000 = -$50.00 expense",
                        },
                        "payee_name": {
                            "type": "string",
                            "description": "Payee name (optional)",
                        },
                        "memo": {
                            "type": "string",
                            "description": "Transaction memo/note (optional)",
                        },
                        "category_id": {
                            "type": "string",
                            "description": "Category UUID from YNAB (optional)",
                        },
                    },
                    "required": ["account_id", "date", "amount"],
                }),
            },
        ]
    }

    async fn call_tool(&self, name: &str, args: &Value) -> AppResult<String> {
        match name {
            tools::YNAB_GET_BUDGET_SUMMARY => budget_summary::run(&self.client).await,
            tools::YNAB_GET_CATEGORY_ACTIVITY => {
                let month = args.get("month").and_then(Value::as_str);
                category_activity::run(&self.client, month).await
            }
            tools::YNAB_LIST_RECENT_TRANSACTIONS => {
                let since_date = args.get("since_date").and_then(Value::as_str);
                let limit = args.get("limit").and_then(Value::as_u64).map(|l| l as usize);
                recent_transactions::run(&self.client, since_date, limit).await
            }
            tools::YNAB_CREATE_TRANSACTION => create_transaction::run(&self.client, args).await,
            other => Err(AppError::UnknownTool(other.to_owned())),
        }
    }
}

/// Format milliunits as currency with the sign before the symbol.
/// YNAB milliunits: 1000 = 1.00.
fn format_milliunits(milliunits: i64, symbol: &str) -> String {
    let amount = milliunits as f64 / 1000.0;
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}{symbol}{:.2}", amount.abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_milliunits_positive() {
        assert_eq!(format_milliunits(1_000, "$"), "$1.00");
        assert_eq!(format_milliunits(123_456, "$"), "$123.46");
    }

    #[test]
    fn test_format_milliunits_negative_sign_before_symbol() {
        assert_eq!(format_milliunits(-50_000, "$"), "-$50.00");
    }

    #[test]
    fn test_format_milliunits_zero() {
        assert_eq!(format_milliunits(0, "€"), "€0.00");
    }
}

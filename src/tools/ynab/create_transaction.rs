// ABOUTME: Transaction creation tool with argument validation and a formatted confirmation
// ABOUTME: Requires account_id, date (YYYY-MM-DD), and a milliunit amount
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 whoop-ynab-mcp contributors

use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::errors::{AppError, AppResult};
use crate::providers::ynab::{SaveTransaction, Transaction, YnabClient};
use crate::tools::render;

use super::format_milliunits;

/// Validate arguments, create the transaction, and shape the confirmation
pub async fn run(client: &YnabClient, args: &Value) -> AppResult<String> {
    let transaction = parse_args(args)?;
    let response = client.create_transaction(None, &transaction).await?;
    let budget = client.get_budget(None).await?;
    let symbol = budget.budget.currency_format.currency_symbol;

    let created = response.transaction.ok_or_else(|| {
        AppError::InvalidResponse {
            provider: crate::constants::providers::YNAB.to_owned(),
            detail: "transaction was created but no transaction data was returned".to_owned(),
        }
    })?;

    Ok(render(&shape(
        &created,
        &response.duplicate_import_ids,
        &symbol,
    )))
}

fn parse_args(args: &Value) -> AppResult<SaveTransaction> {
    let account_id = required_str(args, "account_id")?;
    let date = required_str(args, "date")?;
    if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        return Err(AppError::invalid_arguments(
            "date must be in YYYY-MM-DD format",
        ));
    }
    let amount = args
        .get("amount")
        .and_then(Value::as_i64)
        .ok_or_else(|| AppError::invalid_arguments("amount is required"))?;

    Ok(SaveTransaction {
        account_id: account_id.to_owned(),
        date: date.to_owned(),
        amount,
        payee_name: optional_str(args, "payee_name"),
        category_id: optional_str(args, "category_id"),
        memo: optional_str(args, "memo"),
    })
}

fn required_str<'a>(args: &'a Value, key: &str) -> AppResult<&'a str> {
    args.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::invalid_arguments(format!("{key} is required")))
}

fn optional_str(args: &Value, key: &str) -> Option<String> {
    args.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

fn shape(created: &Transaction, duplicate_import_ids: &[String], symbol: &str) -> Value {
    json!({
        "success": true,
        "message": "Transaction created successfully",
        "transaction": {
            "id": created.id,
            "date": created.date,
            "amount": created.amount,
            "amountFormatted": format_milliunits(created.amount, symbol),
            "payee": created.payee_name.as_deref().unwrap_or("Unknown"),
            "category": created.category_name.as_deref().unwrap_or("Uncategorized"),
            "account": created.account_name,
            "memo": created.memo,
            "cleared": created.cleared,
            "approved": created.approved,
        },
        "duplicateImportIds": duplicate_import_ids,
    })
}

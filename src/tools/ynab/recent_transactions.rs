// ABOUTME: Recent transaction listing sorted newest first with inflow/outflow totals
// ABOUTME: Optional since_date filter and limit (default 20); deleted transactions are dropped
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 whoop-ynab-mcp contributors

use serde_json::{json, Value};

use crate::errors::AppResult;
use crate::providers::ynab::{Transaction, YnabClient};
use crate::tools::render;

use super::format_milliunits;

const DEFAULT_LIMIT: usize = 20;

/// Fetch, filter, sort, and shape the transaction listing
pub async fn run(
    client: &YnabClient,
    since_date: Option<&str>,
    limit: Option<usize>,
) -> AppResult<String> {
    let response = client.get_transactions(None, since_date, None).await?;
    let budget = client.get_budget(None).await?;
    let symbol = budget.budget.currency_format.currency_symbol;
    Ok(render(&shape(
        &response.transactions,
        since_date,
        limit,
        &symbol,
    )))
}

fn shape(
    transactions: &[Transaction],
    since_date: Option<&str>,
    limit: Option<usize>,
    symbol: &str,
) -> Value {
    let mut live: Vec<&Transaction> = transactions.iter().filter(|t| !t.deleted).collect();
    let total_available = live.len();

    // Newest first, ties broken by magnitude
    live.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.amount.abs().cmp(&a.amount.abs()))
    });

    let max = limit.unwrap_or(DEFAULT_LIMIT);
    live.truncate(max);

    let total_inflow: i64 = live.iter().filter(|t| t.amount > 0).map(|t| t.amount).sum();
    let total_outflow: i64 = live
        .iter()
        .filter(|t| t.amount < 0)
        .map(|t| t.amount.abs())
        .sum();

    let formatted: Vec<Value> = live
        .iter()
        .map(|t| {
            json!({
                "id": t.id,
                "date": t.date,
                "amount": t.amount,
                "amountFormatted": format_milliunits(t.amount, symbol),
                "payee": t.payee_name.as_deref().unwrap_or("Unknown"),
                "category": t.category_name.as_deref().unwrap_or("Uncategorized"),
                "account": t.account_name,
                "memo": t.memo,
                "cleared": t.cleared,
                "approved": t.approved,
                "flagColor": t.flag_color,
                "isTransfer": t.transfer_account_id.is_some(),
                "transferAccount": t.transfer_account_id,
                "hasSubtransactions": !t.subtransactions.is_empty(),
                "subtransactionCount": t.subtransactions.len(),
            })
        })
        .collect();

    json!({
        "summary": {
            "transactionCount": formatted.len(),
            "totalShown": formatted.len(),
            "totalAvailable": total_available,
            "sinceDate": since_date.unwrap_or("all time"),
            "limit": max,
            "totalInflow": total_inflow,
            "totalInflowFormatted": format_milliunits(total_inflow, symbol),
            "totalOutflow": total_outflow,
            "totalOutflowFormatted": format_milliunits(total_outflow, symbol),
            "netAmount": total_inflow - total_outflow,
            "netAmountFormatted": format_milliunits(total_inflow - total_outflow, symbol),
        },
        "transactions": formatted,
    })
}

// ABOUTME: Budget overview tool with account balances, category group totals, and net worth
// ABOUTME: Splits open accounts into on-budget and off-budget sections with formatted amounts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 whoop-ynab-mcp contributors

use serde_json::{json, Value};

use crate::errors::AppResult;
use crate::providers::ynab::{Account, BudgetSummary, YnabClient};
use crate::tools::render;

use super::format_milliunits;

/// Fetch the full budget and shape the overview
pub async fn run(client: &YnabClient) -> AppResult<String> {
    let detail = client.get_budget(None).await?;
    Ok(render(&shape(&detail.budget)))
}

fn shape(budget: &BudgetSummary) -> Value {
    let symbol = budget.currency_format.currency_symbol.as_str();

    let on_budget: Vec<&Account> = budget
        .accounts
        .iter()
        .filter(|a| a.on_budget && !a.closed)
        .collect();
    let off_budget: Vec<&Account> = budget
        .accounts
        .iter()
        .filter(|a| !a.on_budget && !a.closed)
        .collect();

    let total_on: i64 = on_budget.iter().map(|a| a.balance).sum();
    let total_off: i64 = off_budget.iter().map(|a| a.balance).sum();

    let mut total_budgeted = 0_i64;
    let mut total_activity = 0_i64;
    let mut total_available = 0_i64;

    let groups: Vec<Value> = budget
        .category_groups
        .iter()
        .filter(|cg| !cg.hidden && !cg.deleted)
        .map(|cg| {
            let visible: Vec<_> = cg
                .categories
                .iter()
                .filter(|c| !c.hidden && !c.deleted)
                .collect();
            let budgeted: i64 = visible.iter().map(|c| c.budgeted).sum();
            let activity: i64 = visible.iter().map(|c| c.activity).sum();
            let balance: i64 = visible.iter().map(|c| c.balance).sum();

            total_budgeted += budgeted;
            total_activity += activity;
            total_available += balance;

            json!({
                "name": cg.name,
                "budgeted": budgeted,
                "budgetedFormatted": format_milliunits(budgeted, symbol),
                "activity": activity,
                "activityFormatted": format_milliunits(activity, symbol),
                "balance": balance,
                "balanceFormatted": format_milliunits(balance, symbol),
                "categoryCount": visible.len(),
            })
        })
        .collect();

    json!({
        "budget": {
            "id": budget.id,
            "name": budget.name,
            "currency": budget.currency_format.iso_code,
            "currencySymbol": symbol,
            "lastModified": budget.last_modified_on,
        },
        "accounts": {
            "onBudget": {
                "count": on_budget.len(),
                "totalBalance": total_on,
                "totalBalanceFormatted": format_milliunits(total_on, symbol),
                "accounts": on_budget.iter().map(|a| json!({
                    "id": a.id,
                    "name": a.name,
                    "type": a.account_type,
                    "balance": a.balance,
                    "balanceFormatted": format_milliunits(a.balance, symbol),
                    "clearedBalance": a.cleared_balance,
                    "unclearedBalance": a.uncleared_balance,
                })).collect::<Vec<_>>(),
            },
            "offBudget": {
                "count": off_budget.len(),
                "totalBalance": total_off,
                "totalBalanceFormatted": format_milliunits(total_off, symbol),
                "accounts": off_budget.iter().map(|a| json!({
                    "id": a.id,
                    "name": a.name,
                    "type": a.account_type,
                    "balance": a.balance,
                    "balanceFormatted": format_milliunits(a.balance, symbol),
                })).collect::<Vec<_>>(),
            },
            "netWorth": total_on + total_off,
            "netWorthFormatted": format_milliunits(total_on + total_off, symbol),
        },
        "categoryGroups": {
            "totalBudgeted": total_budgeted,
            "totalBudgetedFormatted": format_milliunits(total_budgeted, symbol),
            "totalActivity": total_activity,
            "totalActivityFormatted": format_milliunits(total_activity, symbol),
            "totalAvailable": total_available,
            "totalAvailableFormatted": format_milliunits(total_available, symbol),
            "groups": groups,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ynab::{Category, CategoryGroup, CurrencyFormat};

    fn account(name: &str, on_budget: bool, closed: bool, balance: i64) -> Account {
        Account {
            id: format!("id-{name}"),
            name: name.to_owned(),
            account_type: "checking".to_owned(),
            on_budget,
            closed,
            balance,
            cleared_balance: balance,
            uncleared_balance: 0,
            deleted: false,
        }
    }

    fn sample_budget() -> BudgetSummary {
        BudgetSummary {
            id: "b1".to_owned(),
            name: "Household".to_owned(),
            last_modified_on: Some("2024-03-01T00:00:00Z".to_owned()),
            currency_format: CurrencyFormat {
                iso_code: "USD".to_owned(),
                currency_symbol: "$".to_owned(),
                decimal_digits: Some(2),
            },
            accounts: vec![
                account("Checking", true, false, 1_500_000),
                account("Savings", true, false, 10_000_000),
                account("Old card", true, true, 0),
                account("Brokerage", false, false, 50_000_000),
            ],
            category_groups: vec![CategoryGroup {
                id: "cg1".to_owned(),
                name: "Bills".to_owned(),
                hidden: false,
                deleted: false,
                categories: vec![
                    Category {
                        id: "c1".to_owned(),
                        category_group_id: "cg1".to_owned(),
                        category_group_name: None,
                        name: "Rent".to_owned(),
                        hidden: false,
                        budgeted: 2_000_000,
                        activity: -2_000_000,
                        balance: 0,
                        goal_type: None,
                        goal_target: None,
                        goal_percentage_complete: None,
                        deleted: false,
                    },
                    Category {
                        id: "c2".to_owned(),
                        category_group_id: "cg1".to_owned(),
                        category_group_name: None,
                        name: "Hidden".to_owned(),
                        hidden: true,
                        budgeted: 999_000,
                        activity: 0,
                        balance: 999_000,
                        goal_type: None,
                        goal_target: None,
                        goal_percentage_complete: None,
                        deleted: false,
                    },
                ],
            }],
        }
    }

    #[test]
    fn test_shape_splits_accounts_and_skips_closed() {
        let summary = shape(&sample_budget());
        assert_eq!(summary["accounts"]["onBudget"]["count"], 2);
        assert_eq!(summary["accounts"]["offBudget"]["count"], 1);
        assert_eq!(summary["accounts"]["onBudget"]["totalBalance"], 11_500_000);
        assert_eq!(summary["accounts"]["netWorth"], 61_500_000);
        assert_eq!(
            summary["accounts"]["netWorthFormatted"],
            "$61500.00"
        );
    }

    #[test]
    fn test_shape_excludes_hidden_categories_from_totals() {
        let summary = shape(&sample_budget());
        assert_eq!(summary["categoryGroups"]["totalBudgeted"], 2_000_000);
        assert_eq!(summary["categoryGroups"]["groups"][0]["categoryCount"], 1);
        assert_eq!(
            summary["categoryGroups"]["groups"][0]["activityFormatted"],
            "-$2000.00"
        );
    }
}

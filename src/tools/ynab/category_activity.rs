// ABOUTME: Per-month category budgeted, activity, and balance breakdown grouped by category group
// ABOUTME: Groups and categories are sorted by name; hidden and deleted categories are excluded
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 whoop-ynab-mcp contributors

use std::collections::BTreeMap;

use serde_json::{json, Value};

use crate::errors::AppResult;
use crate::providers::ynab::{MonthDetail, YnabClient};
use crate::tools::render;

use super::format_milliunits;

/// Fetch the month detail plus currency metadata and shape the breakdown
pub async fn run(client: &YnabClient, month: Option<&str>) -> AppResult<String> {
    let month_detail = client.get_month(None, month).await?;
    let budget = client.get_budget(None).await?;
    let symbol = budget.budget.currency_format.currency_symbol;
    Ok(render(&shape(&month_detail, &symbol)))
}

fn shape(month: &MonthDetail, symbol: &str) -> Value {
    // BTreeMap keeps group names sorted
    let mut by_group: BTreeMap<String, Vec<Value>> = BTreeMap::new();

    for category in &month.categories {
        if category.deleted || category.hidden {
            continue;
        }
        let group_name = category
            .category_group_name
            .clone()
            .unwrap_or_else(|| "Unknown".to_owned());
        by_group.entry(group_name).or_default().push(json!({
            "id": category.id,
            "name": category.name,
            "budgeted": category.budgeted,
            "budgetedFormatted": format_milliunits(category.budgeted, symbol),
            "activity": category.activity,
            "activityFormatted": format_milliunits(category.activity, symbol),
            "balance": category.balance,
            "balanceFormatted": format_milliunits(category.balance, symbol),
            "goalType": category.goal_type,
            "goalTarget": category.goal_target,
            "goalTargetFormatted": category
                .goal_target
                .map(|t| format_milliunits(t, symbol)),
            "goalPercentageComplete": category.goal_percentage_complete,
        }));
    }

    let mut total_budgeted = 0_i64;
    let mut total_activity = 0_i64;
    let mut total_balance = 0_i64;

    let groups: Vec<Value> = by_group
        .into_iter()
        .map(|(name, mut categories)| {
            categories.sort_by(|a, b| a["name"].as_str().cmp(&b["name"].as_str()));

            let budgeted: i64 = categories.iter().filter_map(|c| c["budgeted"].as_i64()).sum();
            let activity: i64 = categories.iter().filter_map(|c| c["activity"].as_i64()).sum();
            let balance: i64 = categories.iter().filter_map(|c| c["balance"].as_i64()).sum();

            total_budgeted += budgeted;
            total_activity += activity;
            total_balance += balance;

            json!({
                "name": name,
                "budgeted": budgeted,
                "budgetedFormatted": format_milliunits(budgeted, symbol),
                "activity": activity,
                "activityFormatted": format_milliunits(activity, symbol),
                "balance": balance,
                "balanceFormatted": format_milliunits(balance, symbol),
                "categoryCount": categories.len(),
                "categories": categories,
            })
        })
        .collect();

    json!({
        "month": month.month,
        "monthSummary": {
            "income": month.income,
            "incomeFormatted": format_milliunits(month.income, symbol),
            "budgeted": month.budgeted,
            "budgetedFormatted": format_milliunits(month.budgeted, symbol),
            "activity": month.activity,
            "activityFormatted": format_milliunits(month.activity, symbol),
            "toBeBudgeted": month.to_be_budgeted,
            "toBeBudgetedFormatted": format_milliunits(month.to_be_budgeted, symbol),
            "ageOfMoney": month.age_of_money,
        },
        "totals": {
            "budgeted": total_budgeted,
            "budgetedFormatted": format_milliunits(total_budgeted, symbol),
            "activity": total_activity,
            "activityFormatted": format_milliunits(total_activity, symbol),
            "balance": total_balance,
            "balanceFormatted": format_milliunits(total_balance, symbol),
        },
        "categoryGroups": groups,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ynab::Category;

    fn category(group: &str, name: &str, budgeted: i64, activity: i64) -> Category {
        Category {
            id: format!("id-{name}"),
            category_group_id: format!("cg-{group}"),
            category_group_name: Some(group.to_owned()),
            name: name.to_owned(),
            hidden: false,
            budgeted,
            activity,
            balance: budgeted + activity,
            goal_type: None,
            goal_target: None,
            goal_percentage_complete: None,
            deleted: false,
        }
    }

    fn sample_month() -> MonthDetail {
        MonthDetail {
            month: "2024-03-01".to_owned(),
            income: 5_000_000,
            budgeted: 4_500_000,
            activity: -3_200_000,
            to_be_budgeted: 500_000,
            age_of_money: Some(25),
            categories: vec![
                category("Bills", "Rent", 2_000_000, -2_000_000),
                category("Bills", "Electric", 150_000, -120_000),
                category("Fun", "Dining", 300_000, -250_000),
            ],
        }
    }

    #[test]
    fn test_shape_groups_and_sorts_by_name() {
        let analysis = shape(&sample_month(), "$");
        let groups = analysis["categoryGroups"].as_array().unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0]["name"], "Bills");
        assert_eq!(groups[1]["name"], "Fun");
        // categories within a group are name-sorted too
        assert_eq!(groups[0]["categories"][0]["name"], "Electric");
        assert_eq!(groups[0]["categories"][1]["name"], "Rent");
    }

    #[test]
    fn test_shape_totals_across_groups() {
        let analysis = shape(&sample_month(), "$");
        assert_eq!(analysis["totals"]["budgeted"], 2_450_000);
        assert_eq!(analysis["totals"]["activity"], -2_370_000);
        assert_eq!(analysis["totals"]["activityFormatted"], "-$2370.00");
        assert_eq!(analysis["monthSummary"]["ageOfMoney"], 25);
    }

    #[test]
    fn test_shape_skips_hidden_and_deleted() {
        let mut month = sample_month();
        month.categories[2].hidden = true;
        let analysis = shape(&month, "$");
        assert_eq!(analysis["categoryGroups"].as_array().unwrap().len(), 1);
    }
}

// ABOUTME: YNAB API v1 client using personal-access-token bearer authentication
// ABOUTME: Budget, month, and transaction endpoints with friendly provider error mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 whoop-ynab-mcp contributors

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{providers, ynab};
use crate::errors::{AppError, AppResult};

// ============================================================================
// YNAB API Response Structures
// ============================================================================

/// YNAB wraps every successful payload in `{ "data": ... }`
#[derive(Debug, Deserialize)]
struct YnabResponse<T> {
    data: T,
}

/// Error body shape returned by the YNAB API
#[derive(Debug, Deserialize)]
struct YnabErrorBody {
    error: YnabErrorDetail,
}

#[derive(Debug, Deserialize)]
struct YnabErrorDetail {
    detail: String,
}

/// Full budget payload with change-tracking knowledge
#[derive(Debug, Deserialize)]
pub struct BudgetDetail {
    /// The budget itself
    pub budget: BudgetSummary,
    /// Server knowledge for delta requests (unused here, surfaced for completeness)
    pub server_knowledge: i64,
}

/// Budget with accounts and category groups
#[derive(Debug, Deserialize)]
pub struct BudgetSummary {
    /// Budget UUID
    pub id: String,
    /// Budget name
    pub name: String,
    /// Last modification timestamp
    pub last_modified_on: Option<String>,
    /// Currency formatting metadata
    pub currency_format: CurrencyFormat,
    /// Accounts, present on the full-budget endpoint
    #[serde(default)]
    pub accounts: Vec<Account>,
    /// Category groups with nested categories
    #[serde(default)]
    pub category_groups: Vec<CategoryGroup>,
}

/// Currency display settings for a budget
#[derive(Debug, Deserialize)]
pub struct CurrencyFormat {
    /// ISO 4217 code
    pub iso_code: String,
    /// Currency symbol, e.g. `$`
    pub currency_symbol: String,
    /// Decimal digits displayed by YNAB
    pub decimal_digits: Option<u32>,
}

/// A YNAB account. Balances are milliunits (1000 = 1.00)
#[derive(Debug, Deserialize)]
pub struct Account {
    /// Account UUID
    pub id: String,
    /// Account name
    pub name: String,
    /// Account type (checking, savings, creditCard, ...)
    #[serde(rename = "type")]
    pub account_type: String,
    /// Whether the account participates in the budget
    pub on_budget: bool,
    /// Whether the account is closed
    pub closed: bool,
    /// Current balance in milliunits
    pub balance: i64,
    /// Cleared balance in milliunits
    pub cleared_balance: i64,
    /// Uncleared balance in milliunits
    pub uncleared_balance: i64,
    /// Tombstone flag
    pub deleted: bool,
}

/// Category group with nested categories
#[derive(Debug, Deserialize)]
pub struct CategoryGroup {
    /// Group UUID
    pub id: String,
    /// Group name
    pub name: String,
    /// Hidden in the YNAB UI
    pub hidden: bool,
    /// Tombstone flag
    pub deleted: bool,
    /// Categories in this group
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// A budget category. All amounts are milliunits
#[derive(Debug, Deserialize)]
pub struct Category {
    /// Category UUID
    pub id: String,
    /// Owning group UUID
    pub category_group_id: String,
    /// Owning group name, present on month endpoints
    pub category_group_name: Option<String>,
    /// Category name
    pub name: String,
    /// Hidden in the YNAB UI
    pub hidden: bool,
    /// Budgeted this month
    pub budgeted: i64,
    /// Activity (spending) this month
    pub activity: i64,
    /// Available balance
    pub balance: i64,
    /// Goal type (TB, TBD, MF, NEED, DEBT)
    pub goal_type: Option<String>,
    /// Goal target amount
    pub goal_target: Option<i64>,
    /// Goal completion percentage
    pub goal_percentage_complete: Option<i64>,
    /// Tombstone flag
    pub deleted: bool,
}

/// Categories and totals for a single month
#[derive(Debug, Deserialize)]
pub struct MonthDetail {
    /// Month in `YYYY-MM-01` form
    pub month: String,
    /// Income in milliunits
    pub income: i64,
    /// Budgeted in milliunits
    pub budgeted: i64,
    /// Activity in milliunits
    pub activity: i64,
    /// To-be-budgeted in milliunits
    pub to_be_budgeted: i64,
    /// Age of money in days
    pub age_of_money: Option<i64>,
    /// Categories for the month
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Debug, Deserialize)]
struct MonthWrapper {
    month: MonthDetail,
}

/// A transaction. Amounts are milliunits; negative = outflow
#[derive(Debug, Clone, Deserialize)]
pub struct Transaction {
    /// Transaction UUID
    pub id: String,
    /// Transaction date (`YYYY-MM-DD`)
    pub date: String,
    /// Amount in milliunits
    pub amount: i64,
    /// Memo text
    pub memo: Option<String>,
    /// Cleared status (cleared, uncleared, reconciled)
    pub cleared: String,
    /// Whether the transaction is approved
    pub approved: bool,
    /// Flag color, if flagged
    pub flag_color: Option<String>,
    /// Owning account UUID
    pub account_id: String,
    /// Owning account name
    pub account_name: String,
    /// Payee name
    pub payee_name: Option<String>,
    /// Category name
    pub category_name: Option<String>,
    /// Transfer target account, when this is a transfer
    pub transfer_account_id: Option<String>,
    /// Tombstone flag
    pub deleted: bool,
    /// Split transaction parts
    #[serde(default)]
    pub subtransactions: Vec<SubTransaction>,
}

/// One leg of a split transaction
#[derive(Debug, Clone, Deserialize)]
pub struct SubTransaction {
    /// Subtransaction UUID
    pub id: String,
    /// Amount in milliunits
    pub amount: i64,
    /// Memo text
    pub memo: Option<String>,
    /// Category name
    pub category_name: Option<String>,
}

/// Transactions listing with change-tracking knowledge
#[derive(Debug, Deserialize)]
pub struct TransactionsResponse {
    /// Matching transactions
    pub transactions: Vec<Transaction>,
    /// Server knowledge for delta requests
    pub server_knowledge: i64,
}

/// Request body for creating a transaction
#[derive(Debug, Clone, Default, Serialize)]
pub struct SaveTransaction {
    /// Target account UUID (required)
    pub account_id: String,
    /// Transaction date, `YYYY-MM-DD` (required)
    pub date: String,
    /// Amount in milliunits (required); negative = outflow
    pub amount: i64,
    /// Payee name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payee_name: Option<String>,
    /// Category UUID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    /// Memo text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

#[derive(Debug, Serialize)]
struct SaveTransactionsWrapper<'a> {
    transaction: &'a SaveTransaction,
}

/// Response from creating transactions
#[derive(Debug, Deserialize)]
pub struct SaveTransactionsResponse {
    /// IDs of the created transactions
    pub transaction_ids: Vec<String>,
    /// The created transaction, when a single one was submitted
    pub transaction: Option<Transaction>,
    /// Import IDs that matched existing transactions
    #[serde(default)]
    pub duplicate_import_ids: Vec<String>,
    /// Server knowledge for delta requests
    pub server_knowledge: i64,
}

// ============================================================================
// YNAB Client
// ============================================================================

/// Endpoint configuration, overridable for tests
#[derive(Debug, Clone)]
pub struct YnabEndpoints {
    /// Base URL for YNAB API v1
    pub api_base_url: String,
}

impl Default for YnabEndpoints {
    fn default() -> Self {
        Self {
            api_base_url: ynab::API_BASE_URL.to_owned(),
        }
    }
}

/// YNAB API client with personal-access-token authentication.
///
/// No refresh lifecycle: YNAB PATs are long-lived, so a 401 here means a
/// bad or revoked token and is surfaced with a pointed message instead of
/// triggering a retry.
pub struct YnabClient {
    endpoints: YnabEndpoints,
    http: Client,
    access_token: String,
    budget_id: String,
}

impl YnabClient {
    /// Create a client against the production YNAB endpoint
    #[must_use]
    pub fn new(access_token: impl Into<String>, budget_id: impl Into<String>) -> Self {
        Self::with_endpoints(YnabEndpoints::default(), access_token, budget_id)
    }

    /// Create a client with custom endpoints
    #[must_use]
    pub fn with_endpoints(
        endpoints: YnabEndpoints,
        access_token: impl Into<String>,
        budget_id: impl Into<String>,
    ) -> Self {
        Self {
            endpoints,
            http: Client::new(),
            access_token: access_token.into(),
            budget_id: budget_id.into(),
        }
    }

    /// The default budget ID this client was configured with
    #[must_use]
    pub fn budget_id(&self) -> &str {
        &self.budget_id
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.endpoints.api_base_url.trim_end_matches('/'),
            path
        )
    }

    /// Get budget details including accounts and category groups.
    /// Falls back to the configured default budget when `budget_id` is `None`.
    ///
    /// # Errors
    /// `ApiRequest` with YNAB's detail on any non-2xx status.
    pub async fn get_budget(&self, budget_id: Option<&str>) -> AppResult<BudgetDetail> {
        let id = budget_id.unwrap_or(&self.budget_id);
        self.get_json(&format!("budgets/{id}"), &[]).await
    }

    /// Get categories and totals for a month (`YYYY-MM-01`), defaulting to
    /// the current month.
    ///
    /// # Errors
    /// `ApiRequest` with YNAB's detail on any non-2xx status.
    pub async fn get_month(
        &self,
        budget_id: Option<&str>,
        month: Option<&str>,
    ) -> AppResult<MonthDetail> {
        let id = budget_id.unwrap_or(&self.budget_id);
        let month = month.unwrap_or("current");
        let wrapper: MonthWrapper = self
            .get_json(&format!("budgets/{id}/months/{month}"), &[])
            .await?;
        Ok(wrapper.month)
    }

    /// Get transactions, optionally since a date (`YYYY-MM-DD`) and filtered
    /// by type (`uncategorized` or `unapproved`).
    ///
    /// # Errors
    /// `ApiRequest` with YNAB's detail on any non-2xx status.
    pub async fn get_transactions(
        &self,
        budget_id: Option<&str>,
        since_date: Option<&str>,
        type_filter: Option<&str>,
    ) -> AppResult<TransactionsResponse> {
        let id = budget_id.unwrap_or(&self.budget_id);
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(since) = since_date {
            query.push(("since_date", since.to_owned()));
        }
        if let Some(kind) = type_filter {
            query.push(("type", kind.to_owned()));
        }
        self.get_json(&format!("budgets/{id}/transactions"), &query)
            .await
    }

    /// Create a single transaction.
    ///
    /// # Errors
    /// `ApiRequest` with YNAB's detail on any non-2xx status.
    pub async fn create_transaction(
        &self,
        budget_id: Option<&str>,
        transaction: &SaveTransaction,
    ) -> AppResult<SaveTransactionsResponse> {
        let id = budget_id.unwrap_or(&self.budget_id);
        let url = self.url(&format!("budgets/{id}/transactions"));
        debug!("creating YNAB transaction in budget {id}");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&SaveTransactionsWrapper { transaction })
            .send()
            .await
            .map_err(|source| AppError::Http {
                provider: providers::YNAB.to_owned(),
                source,
            })?;

        Self::decode(response).await
    }

    async fn get_json<T>(&self, path: &str, query: &[(&str, String)]) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("sending YNAB request to {url}");

        let response = self
            .http
            .get(&url)
            .query(query)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|source| AppError::Http {
                provider: providers::YNAB.to_owned(),
                source,
            })?;

        Self::decode(response).await
    }

    async fn decode<T>(response: Response) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::map_api_error(status, &body));
        }

        let envelope: YnabResponse<T> =
            response
                .json()
                .await
                .map_err(|e| AppError::InvalidResponse {
                    provider: providers::YNAB.to_owned(),
                    detail: e.to_string(),
                })?;
        Ok(envelope.data)
    }

    /// Translate common YNAB error statuses into actionable messages
    fn map_api_error(status: StatusCode, body: &str) -> AppError {
        let detail = serde_json::from_str::<YnabErrorBody>(body)
            .map(|b| b.error.detail)
            .unwrap_or_else(|_| body.to_owned());

        let message = match status.as_u16() {
            401 => "invalid or expired access token - check YNAB_ACCESS_TOKEN".to_owned(),
            404 => format!("resource not found: {detail}"),
            429 => "rate limit exceeded - YNAB allows 200 requests per hour".to_owned(),
            s if s >= 500 => format!("YNAB API server error: {detail}"),
            _ => detail,
        };

        AppError::api_request(providers::YNAB, status.as_u16(), message)
    }
}

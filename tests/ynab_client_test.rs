// ABOUTME: Integration tests for the YNAB client and tool set against a mock API
// ABOUTME: Exercises envelope unwrapping, error mapping, and transaction creation

use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use whoop_ynab_mcp::errors::AppError;
use whoop_ynab_mcp::mcp::ToolSet;
use whoop_ynab_mcp::providers::ynab::{SaveTransaction, YnabClient, YnabEndpoints};
use whoop_ynab_mcp::tools::YnabToolSet;

fn mock_client(server: &MockServer) -> YnabClient {
    YnabClient::with_endpoints(
        YnabEndpoints {
            api_base_url: format!("{}/v1", server.uri()),
        },
        "pat-token",
        "budget-1",
    )
}

fn sample_budget() -> Value {
    json!({
        "data": {
            "budget": {
                "id": "budget-1",
                "name": "Household",
                "last_modified_on": "2024-03-01T00:00:00Z",
                "currency_format": {
                    "iso_code": "USD",
                    "currency_symbol": "$",
                    "decimal_digits": 2,
                },
                "accounts": [
                    {
                        "id": "a1",
                        "name": "Checking",
                        "type": "checking",
                        "on_budget": true,
                        "closed": false,
                        "balance": 1_500_000,
                        "cleared_balance": 1_400_000,
                        "uncleared_balance": 100_000,
                        "deleted": false,
                    },
                ],
                "category_groups": [],
            },
            "server_knowledge": 99,
        },
    })
}

#[tokio::test]
async fn budget_fetch_unwraps_data_envelope_and_authenticates() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .and(path("/v1/budgets/budget-1"))
        .and(header("authorization", "Bearer pat-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_budget()))
        .expect(1)
        .mount(&server)
        .await;

    let detail = client.get_budget(None).await.unwrap();
    assert_eq!(detail.budget.name, "Household");
    assert_eq!(detail.server_knowledge, 99);
    assert_eq!(detail.budget.accounts[0].balance, 1_500_000);
}

#[tokio::test]
async fn month_defaults_to_current() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .and(path("/v1/budgets/budget-1/months/current"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "month": {
                    "month": "2024-03-01",
                    "income": 5_000_000,
                    "budgeted": 4_500_000,
                    "activity": -3_200_000,
                    "to_be_budgeted": 500_000,
                    "age_of_money": 25,
                    "categories": [],
                },
            },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let month = client.get_month(None, None).await.unwrap();
    assert_eq!(month.month, "2024-03-01");
    assert_eq!(month.income, 5_000_000);
}

#[tokio::test]
async fn transactions_pass_since_date_filter() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .and(path("/v1/budgets/budget-1/transactions"))
        .and(query_param("since_date", "2024-03-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "transactions": [],
                "server_knowledge": 7,
            },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client
        .get_transactions(None, Some("2024-03-01"), None)
        .await
        .unwrap();
    assert!(response.transactions.is_empty());
}

#[tokio::test]
async fn create_transaction_wraps_the_body() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("POST"))
        .and(path("/v1/budgets/budget-1/transactions"))
        .and(body_partial_json(json!({
            "transaction": {
                "account_id": "a1",
                "date": "2024-03-05",
                "amount": -50_000,
                "payee_name": "Grocer",
            },
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {
                "transaction_ids": ["t1"],
                "transaction": {
                    "id": "t1",
                    "date": "2024-03-05",
                    "amount": -50_000,
                    "memo": null,
                    "cleared": "uncleared",
                    "approved": true,
                    "flag_color": null,
                    "account_id": "a1",
                    "account_name": "Checking",
                    "payee_name": "Grocer",
                    "category_name": null,
                    "transfer_account_id": null,
                    "deleted": false,
                    "subtransactions": [],
                },
                "duplicate_import_ids": [],
                "server_knowledge": 100,
            },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let transaction = SaveTransaction {
        account_id: "a1".to_owned(),
        date: "2024-03-05".to_owned(),
        amount: -50_000,
        payee_name: Some("Grocer".to_owned()),
        ..SaveTransaction::default()
    };
    let response = client.create_transaction(None, &transaction).await.unwrap();
    assert_eq!(response.transaction_ids, vec!["t1"]);
    assert_eq!(response.transaction.unwrap().amount, -50_000);
}

#[tokio::test]
async fn unauthorized_maps_to_actionable_message() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .and(path("/v1/budgets/budget-1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"id": "401", "name": "unauthorized", "detail": "Unauthorized"},
        })))
        .mount(&server)
        .await;

    let err = client.get_budget(None).await.unwrap_err();
    match err {
        AppError::ApiRequest { status, detail, .. } => {
            assert_eq!(status, 401);
            assert!(detail.contains("YNAB_ACCESS_TOKEN"));
        }
        other => panic!("expected ApiRequest, got {other}"),
    }
}

#[tokio::test]
async fn rate_limit_maps_to_quota_message() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .and(path("/v1/budgets/budget-1"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {"id": "429", "name": "too_many_requests", "detail": "Too many requests"},
        })))
        .mount(&server)
        .await;

    let err = client.get_budget(None).await.unwrap_err();
    assert!(err.to_string().contains("200 requests per hour"));
}

#[tokio::test]
async fn budget_summary_tool_end_to_end() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .and(path("/v1/budgets/budget-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_budget()))
        .mount(&server)
        .await;

    let tools = YnabToolSet::new(client);
    let body = tools
        .call_tool("ynab_get_budget_summary", &json!({}))
        .await
        .unwrap();
    let summary: Value = serde_json::from_str(&body).unwrap();

    assert_eq!(summary["budget"]["name"], "Household");
    assert_eq!(summary["accounts"]["onBudget"]["count"], 1);
    assert_eq!(
        summary["accounts"]["onBudget"]["totalBalanceFormatted"],
        "$1500.00"
    );
}

#[tokio::test]
async fn create_transaction_tool_validates_arguments() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    let tools = YnabToolSet::new(client);
    let err = tools
        .call_tool(
            "ynab_create_transaction",
            &json!({"date": "2024-03-05", "amount": -1000}),
        )
        .await
        .unwrap_err();
    assert!(err.to_string().contains("account_id is required"));
}

#[tokio::test]
async fn tool_listing_advertises_all_four_tools() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    let tools = YnabToolSet::new(client);
    let names: Vec<String> = tools.tools().iter().map(|t| t.name.clone()).collect();
    assert_eq!(
        names,
        vec![
            "ynab_get_budget_summary",
            "ynab_get_category_activity",
            "ynab_list_recent_transactions",
            "ynab_create_transaction",
        ]
    );
}

mod common;

use axum::http::Method;
use common::{register_user, send_json, spawn_app};
use serde_json::json;

async fn create_account(router: &axum::Router, token: &str, name: &str) -> String {
    let (status, body) = send_json(
        router,
        Method::POST,
        "/api/v1/accounts",
        Some(token),
        Some(json!({ "name": name, "accountType": "checking" })),
    )
    .await;
    assert_eq!(status, 200, "account creation failed: {body}");
    body["account"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn account_crud_over_http() {
    let app = spawn_app().await;
    let token = register_user(&app.router, "alice@example.com").await;

    let account_id = create_account(&app.router, &token, "Everyday Checking").await;

    let (status, body) = send_json(
        &app.router,
        Method::GET,
        &format!("/api/v1/accounts/{account_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["name"], "Everyday Checking");
    assert_eq!(body["accountType"], "checking");
    assert_eq!(body["currentBalance"], 0.0);
    assert!(body["accessToken"].is_null());

    let (status, body) = send_json(
        &app.router,
        Method::PUT,
        &format!("/api/v1/accounts/{account_id}"),
        Some(&token),
        Some(json!({ "currentBalance": 1250.75 })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["account"]["currentBalance"], 1250.75);

    let (status, _) = send_json(
        &app.router,
        Method::DELETE,
        &format!("/api/v1/accounts/{account_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, 200);

    let (status, body) = send_json(&app.router, Method::GET, "/api/v1/accounts", Some(&token), None).await;
    assert_eq!(status, 200);
    assert_eq!(body["totalAccounts"], 0);
}

#[tokio::test]
async fn cross_user_access_is_not_found() {
    let app = spawn_app().await;
    let alice = register_user(&app.router, "alice@example.com").await;
    let mallory = register_user(&app.router, "mallory@example.com").await;

    let account_id = create_account(&app.router, &alice, "Private").await;

    let (status, _) = send_json(
        &app.router,
        Method::GET,
        &format!("/api/v1/accounts/{account_id}"),
        Some(&mallory),
        None,
    )
    .await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn transaction_crud_and_summary() {
    let app = spawn_app().await;
    let token = register_user(&app.router, "dana@example.com").await;
    let account_id = create_account(&app.router, &token, "Card").await;

    for (amount, category, description, date) in [
        (30.0, "groceries", "corner market", "2025-03-01T12:00:00"),
        (70.0, "groceries", "big box run", "2025-03-02T12:00:00"),
        (40.0, "restaurants", "thai takeout", "2025-03-03T12:00:00"),
    ] {
        let (status, body) = send_json(
            &app.router,
            Method::POST,
            "/api/v1/transactions",
            Some(&token),
            Some(json!({
                "accountId": account_id,
                "amount": amount,
                "transactionType": "debit",
                "description": description,
                "category": category,
                "transactionDate": date,
            })),
        )
        .await;
        assert_eq!(status, 200, "transaction creation failed: {body}");
    }

    // Creating against an account the user does not own is a 404.
    let (status, _) = send_json(
        &app.router,
        Method::POST,
        "/api/v1/transactions",
        Some(&token),
        Some(json!({
            "accountId": "missing",
            "amount": 1.0,
            "transactionType": "debit",
            "description": "orphan",
        })),
    )
    .await;
    assert_eq!(status, 404);

    let (status, body) = send_json(
        &app.router,
        Method::GET,
        "/api/v1/transactions?category=groceries",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["count"], 2);

    let transaction_id = body["transactions"][0]["id"].as_str().unwrap().to_string();
    let (status, body) = send_json(
        &app.router,
        Method::PUT,
        &format!("/api/v1/transactions/{transaction_id}"),
        Some(&token),
        Some(json!({ "category": "shopping", "notes": "actually household stuff" })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["transaction"]["category"], "shopping");
    assert_eq!(body["transaction"]["notes"], "actually household stuff");

    let (status, body) = send_json(
        &app.router,
        Method::GET,
        "/api/v1/transactions/categories/summary",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, 200);
    let categories = body["categories"].as_array().unwrap();
    assert_eq!(body["totalCategories"], 3);
    // Sorted by total descending; the recategorized transaction moved.
    assert_eq!(categories[0]["category"], "shopping");
    assert_eq!(categories[0]["total"], 70.0);
    assert_eq!(categories[1]["category"], "restaurants");
    assert_eq!(categories[1]["average"], 40.0);

    let (status, _) = send_json(
        &app.router,
        Method::DELETE,
        &format!("/api/v1/transactions/{transaction_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, 200);

    let (status, body) = send_json(
        &app.router,
        Method::GET,
        "/api/v1/transactions",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["count"], 2);
}

#[tokio::test]
async fn budget_reports_spent_and_over_flag() {
    let app = spawn_app().await;
    let token = register_user(&app.router, "erin@example.com").await;
    let account_id = create_account(&app.router, &token, "Checking").await;

    let (status, body) = send_json(
        &app.router,
        Method::POST,
        "/api/v1/budgets",
        Some(&token),
        Some(json!({ "name": "Groceries", "category": "groceries", "amount": 100.0 })),
    )
    .await;
    assert_eq!(status, 200, "budget creation failed: {body}");
    let budget_id = body["budget"]["id"].as_str().unwrap().to_string();

    let (status, _) = send_json(
        &app.router,
        Method::POST,
        "/api/v1/transactions",
        Some(&token),
        Some(json!({
            "accountId": account_id,
            "amount": 100.0,
            "transactionType": "debit",
            "description": "grocery run",
            "category": "groceries",
        })),
    )
    .await;
    assert_eq!(status, 200);

    let (status, body) = send_json(&app.router, Method::GET, "/api/v1/budgets", Some(&token), None).await;
    assert_eq!(status, 200);
    let budget = &body["budgets"][0];
    assert_eq!(budget["spentAmount"], 100.0);
    assert_eq!(budget["remainingAmount"], 0.0);
    assert_eq!(budget["percentageUsed"], 100.0);
    assert_eq!(budget["overBudget"], false);

    let (status, body) = send_json(
        &app.router,
        Method::PUT,
        &format!("/api/v1/budgets/{budget_id}"),
        Some(&token),
        Some(json!({ "amount": 80.0 })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["budget"]["overBudget"], true);
    assert_eq!(body["budget"]["remainingAmount"], -20.0);

    let (status, body) = send_json(
        &app.router,
        Method::GET,
        "/api/v1/budgets/summary",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["budgets"]["totalBudgets"], 1);
    assert_eq!(body["budgets"]["overBudgetCount"], 1);
    assert_eq!(body["goals"]["totalGoals"], 0);

    let (status, _) = send_json(
        &app.router,
        Method::DELETE,
        &format!("/api/v1/budgets/{budget_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, 200);
}

#[tokio::test]
async fn goal_contribution_flow() {
    let app = spawn_app().await;
    let token = register_user(&app.router, "frank@example.com").await;

    let (status, body) = send_json(
        &app.router,
        Method::POST,
        "/api/v1/goals",
        Some(&token),
        Some(json!({ "name": "Vacation", "targetAmount": 500.0 })),
    )
    .await;
    assert_eq!(status, 200, "goal creation failed: {body}");
    let goal_id = body["goal"]["id"].as_str().unwrap().to_string();

    // Non-positive contributions are rejected.
    let (status, _) = send_json(
        &app.router,
        Method::POST,
        &format!("/api/v1/goals/{goal_id}/contribute"),
        Some(&token),
        Some(json!({ "amount": -5.0 })),
    )
    .await;
    assert_eq!(status, 400);

    let (status, body) = send_json(
        &app.router,
        Method::POST,
        &format!("/api/v1/goals/{goal_id}/contribute"),
        Some(&token),
        Some(json!({ "amount": 200.0 })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["goal"]["isAchieved"], false);
    assert_eq!(body["goal"]["progressPercentage"], 40.0);

    let (status, body) = send_json(
        &app.router,
        Method::POST,
        &format!("/api/v1/goals/{goal_id}/contribute"),
        Some(&token),
        Some(json!({ "amount": 400.0 })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["goal"]["isAchieved"], true);
    // Progress in contribution responses is capped at 100.
    assert_eq!(body["goal"]["progressPercentage"], 100.0);

    let (status, body) = send_json(&app.router, Method::GET, "/api/v1/goals", Some(&token), None).await;
    assert_eq!(status, 200);
    assert_eq!(body["totalGoals"], 1);
    assert_eq!(body["completedGoals"], 1);

    // Raising the target reopens the goal.
    let (status, body) = send_json(
        &app.router,
        Method::PUT,
        &format!("/api/v1/goals/{goal_id}"),
        Some(&token),
        Some(json!({ "targetAmount": 2000.0 })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["goal"]["isAchieved"], false);
    assert_eq!(body["goal"]["progressPercentage"], 30.0);

    let (status, _) = send_json(
        &app.router,
        Method::DELETE,
        &format!("/api/v1/goals/{goal_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, 200);
}

#[tokio::test]
async fn user_profile_update() {
    let app = spawn_app().await;
    let token = register_user(&app.router, "gabi@example.com").await;

    let (status, body) = send_json(
        &app.router,
        Method::PUT,
        "/api/v1/users/profile",
        Some(&token),
        Some(json!({ "currency": "EUR", "timezone": "Europe/Berlin" })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["user"]["currency"], "EUR");
    assert_eq!(body["user"]["timezone"], "Europe/Berlin");

    let (status, body) = send_json(
        &app.router,
        Method::GET,
        "/api/v1/users/profile",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["currency"], "EUR");
}

#[tokio::test]
async fn bank_endpoints_without_credentials_are_unavailable() {
    let app = spawn_app().await;
    let token = register_user(&app.router, "henry@example.com").await;

    let (status, _) = send_json(
        &app.router,
        Method::POST,
        "/api/v1/plaid/create-link-token",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, 503);

    let (status, _) = send_json(
        &app.router,
        Method::POST,
        "/api/v1/plaid/sync-transactions",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, 503);

    let (status, body) = send_json(
        &app.router,
        Method::GET,
        "/api/v1/plaid/linked-accounts",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["totalAccounts"], 0);
}

#[tokio::test]
async fn assistant_chat_and_suggestions() {
    let app = spawn_app().await;
    let token = register_user(&app.router, "iris@example.com").await;

    let (status, body) = send_json(
        &app.router,
        Method::POST,
        "/api/v1/ai/chat",
        Some(&token),
        Some(json!({ "message": "hello" })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["query"], "hello");
    assert!(body["response"]
        .as_str()
        .unwrap()
        .contains("personal finance assistant"));

    let (status, body) = send_json(
        &app.router,
        Method::POST,
        "/api/v1/ai/chat",
        Some(&token),
        Some(json!({ "message": "how much did I spend this month?" })),
    )
    .await;
    assert_eq!(status, 200);
    assert!(body["response"].as_str().unwrap().contains("You spent"));

    let (status, body) = send_json(
        &app.router,
        Method::GET,
        "/api/v1/ai/suggestions",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, 200);
    assert!(body["suggestions"].as_array().unwrap().len() >= 5);

    let (status, body) = send_json(
        &app.router,
        Method::GET,
        "/api/v1/ai/insights",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, 200);
    // A fresh user has no data, so no insights are generated.
    assert_eq!(body["insights"].as_array().unwrap().len(), 0);
}

mod common;

use axum::http::Method;
use common::{register_user, send_json, spawn_app};
use serde_json::json;

#[tokio::test]
async fn register_login_and_access_protected_route() {
    let app = spawn_app().await;

    // Protected route without a token fails.
    let (status, _) = send_json(&app.router, Method::GET, "/api/v1/accounts", None, None).await;
    assert_eq!(status, 401);

    let token = register_user(&app.router, "alice@example.com").await;

    // Same route with the registration token succeeds.
    let (status, body) = send_json(
        &app.router,
        Method::GET,
        "/api/v1/accounts",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["totalAccounts"], 0);

    // Login issues a fresh token.
    let (status, body) = send_json(
        &app.router,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "email": "alice@example.com", "password": "correct-horse-battery" })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["tokenType"], "bearer");
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert!(body["user"]["passwordHash"].is_null());

    // Me endpoint reflects the authenticated user.
    let (status, body) = send_json(
        &app.router,
        Method::GET,
        "/api/v1/auth/me",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["email"], "alice@example.com");

    // Refresh returns a usable token.
    let (status, body) = send_json(
        &app.router,
        Method::POST,
        "/api/v1/auth/refresh",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, 200);
    let refreshed = body["accessToken"].as_str().unwrap().to_string();
    let (status, _) = send_json(
        &app.router,
        Method::GET,
        "/api/v1/auth/me",
        Some(&refreshed),
        None,
    )
    .await;
    assert_eq!(status, 200);
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let app = spawn_app().await;
    register_user(&app.router, "bob@example.com").await;

    let (status, body) = send_json(
        &app.router,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({ "email": "bob@example.com", "password": "correct-horse-battery" })),
    )
    .await;
    assert_eq!(status, 400);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = spawn_app().await;
    register_user(&app.router, "carol@example.com").await;

    let (status, _) = send_json(
        &app.router,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "email": "carol@example.com", "password": "nope" })),
    )
    .await;
    assert_eq!(status, 401);

    let (status, _) = send_json(
        &app.router,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "email": "nobody@example.com", "password": "nope" })),
    )
    .await;
    assert_eq!(status, 401);
}

#[tokio::test]
async fn garbage_token_is_unauthorized() {
    let app = spawn_app().await;
    let (status, _) = send_json(
        &app.router,
        Method::GET,
        "/api/v1/accounts",
        Some("not-a-token"),
        None,
    )
    .await;
    assert_eq!(status, 401);
}

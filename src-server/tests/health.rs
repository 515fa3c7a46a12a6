mod common;

use axum::http::Method;
use common::{send_json, spawn_app};

#[tokio::test]
async fn healthz_works() {
    let app = spawn_app().await;
    let (status, _) = send_json(&app.router, Method::GET, "/api/v1/healthz", None, None).await;
    assert_eq!(status, 200);
}

#[tokio::test]
async fn root_banner_and_openapi_are_public() {
    let app = spawn_app().await;

    let (status, body) = send_json(&app.router, Method::GET, "/", None, None).await;
    assert_eq!(status, 200);
    assert!(body["message"].as_str().unwrap().contains("FinTrack"));

    let (status, body) = send_json(&app.router, Method::GET, "/openapi.json", None, None).await;
    assert_eq!(status, 200);
    assert!(body["openapi"].is_string());
}

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::json;

use crate::main_lib::AppState;

#[utoipa::path(get, path = "/api/v1/healthz", responses((status = 200, description = "Health")))]
pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Welcome to the FinTrack API",
        "version": env!("CARGO_PKG_VERSION"),
        "docs": "/openapi.json",
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/healthz", get(healthz))
}

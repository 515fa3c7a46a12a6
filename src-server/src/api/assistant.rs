use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::main_lib::AppState;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub query: String,
}

async fn chat(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
    Json(request): Json<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    let reply = state
        .assistant_service
        .chat(&current_user.0.id, &request.message)
        .await?;
    Ok(Json(ChatResponse {
        response: reply.message,
        query: request.message,
    }))
}

async fn suggestions() -> Json<serde_json::Value> {
    Json(json!({
        "suggestions": [
            "How much did I spend on groceries last month?",
            "Show me my budget status",
            "What's my biggest expense category this year?",
            "Find all transactions at Starbucks",
            "How are my savings goals doing?",
            "Should I increase my grocery budget?",
            "What can I do to save more money?",
        ],
        "categories": [
            {
                "name": "Spending Analysis",
                "queries": [
                    "How much did I spend last month?",
                    "What's my biggest expense category?",
                    "Show me my spending trends",
                ],
            },
            {
                "name": "Budget Management",
                "queries": [
                    "Show me my budget status",
                    "Am I over budget this month?",
                    "How much budget do I have left?",
                ],
            },
            {
                "name": "Transaction Search",
                "queries": [
                    "Find transactions at [merchant]",
                    "Show me all restaurant expenses",
                    "Find large transactions this month",
                ],
            },
            {
                "name": "Financial Advice",
                "queries": [
                    "How can I save more money?",
                    "Should I increase my budget?",
                    "What's my financial health like?",
                ],
            },
            {
                "name": "Goals & Savings",
                "queries": [
                    "How are my savings goals?",
                    "When will I reach my goal?",
                    "How much should I save monthly?",
                ],
            },
        ],
    }))
}

async fn insights(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
) -> ApiResult<Json<serde_json::Value>> {
    let insights = state.assistant_service.insights(&current_user.0.id).await?;
    Ok(Json(json!({
        "insights": insights,
        "generatedAt": chrono::Utc::now().to_rfc3339(),
    })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ai/chat", post(chat))
        .route("/ai/suggestions", get(suggestions))
        .route("/ai/insights", get(insights))
}

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, put},
    Extension, Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::main_lib::AppState;
use fintrack_core::budgets::{BudgetOverview, BudgetUpdate, NewBudget};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListQuery {
    is_active: Option<bool>,
}

async fn list_budgets(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let budgets = state
        .budget_service
        .get_budgets(&current_user.0.id, Some(query.is_active.unwrap_or(true)))?;
    Ok(Json(json!({
        "budgets": budgets,
        "totalBudgets": budgets.len(),
    })))
}

async fn create_budget(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<NewBudget>,
) -> ApiResult<Json<serde_json::Value>> {
    let created = state
        .budget_service
        .create_budget(&current_user.0.id, payload)
        .await?;
    Ok(Json(json!({
        "message": "Budget created successfully",
        "budget": created,
    })))
}

async fn update_budget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<BudgetUpdate>,
) -> ApiResult<Json<serde_json::Value>> {
    let updated = state
        .budget_service
        .update_budget(&current_user.0.id, &id, payload)
        .await?;
    Ok(Json(json!({
        "message": "Budget updated successfully",
        "budget": updated,
    })))
}

async fn delete_budget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
) -> ApiResult<Json<serde_json::Value>> {
    state
        .budget_service
        .delete_budget(&current_user.0.id, &id)
        .await?;
    Ok(Json(json!({ "message": "Budget deleted successfully" })))
}

async fn budget_summary(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
) -> ApiResult<Json<BudgetOverview>> {
    let overview = state.budget_service.get_overview(&current_user.0.id)?;
    Ok(Json(overview))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/budgets", get(list_budgets).post(create_budget))
        .route("/budgets/summary", get(budget_summary))
        .route("/budgets/{id}", put(update_budget).delete(delete_budget))
}

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::main_lib::AppState;
use fintrack_core::goals::{GoalUpdate, NewGoal};

async fn list_goals(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
) -> ApiResult<Json<serde_json::Value>> {
    let goals = state.goal_service.get_goals(&current_user.0.id)?;
    let active_goals = goals.iter().filter(|g| g.goal.is_active).count();
    let completed_goals = goals.iter().filter(|g| g.goal.is_achieved).count();
    Ok(Json(json!({
        "goals": goals,
        "totalGoals": goals.len(),
        "activeGoals": active_goals,
        "completedGoals": completed_goals,
    })))
}

async fn create_goal(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<NewGoal>,
) -> ApiResult<Json<serde_json::Value>> {
    let created = state
        .goal_service
        .create_goal(&current_user.0.id, payload)
        .await?;
    Ok(Json(json!({
        "message": "Goal created successfully",
        "goal": created,
    })))
}

async fn get_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
) -> ApiResult<Json<serde_json::Value>> {
    let goal = state.goal_service.get_goal(&current_user.0.id, &id)?;
    Ok(Json(json!({ "goal": goal })))
}

async fn update_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<GoalUpdate>,
) -> ApiResult<Json<serde_json::Value>> {
    let updated = state
        .goal_service
        .update_goal(&current_user.0.id, &id, payload)
        .await?;
    Ok(Json(json!({
        "message": "Goal updated successfully",
        "goal": updated,
    })))
}

#[derive(Deserialize)]
struct ContributeBody {
    amount: f64,
}

async fn contribute_to_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
    Json(body): Json<ContributeBody>,
) -> ApiResult<Json<serde_json::Value>> {
    let goal = state
        .goal_service
        .contribute(&current_user.0.id, &id, body.amount)
        .await?;
    Ok(Json(json!({
        "message": format!("Successfully contributed ${:.2} to goal", body.amount),
        "goal": goal,
    })))
}

async fn delete_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
) -> ApiResult<Json<serde_json::Value>> {
    state
        .goal_service
        .delete_goal(&current_user.0.id, &id)
        .await?;
    Ok(Json(json!({ "message": "Goal deleted successfully" })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/goals", get(list_goals).post(create_goal))
        .route(
            "/goals/{id}",
            get(get_goal).put(update_goal).delete(delete_goal),
        )
        .route("/goals/{id}/contribute", post(contribute_to_goal))
}

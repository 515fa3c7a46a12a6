use std::sync::Arc;

use axum::{extract::State, routing::get, Extension, Json, Router};
use serde_json::json;

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::main_lib::AppState;
use crate::models::UserProfile;
use fintrack_core::users::UserUpdate;

async fn get_profile(
    Extension(current_user): Extension<CurrentUser>,
) -> ApiResult<Json<UserProfile>> {
    Ok(Json(UserProfile::from(current_user.0)))
}

async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<UserUpdate>,
) -> ApiResult<Json<serde_json::Value>> {
    let updated = state
        .user_service
        .update_profile(&current_user.0.id, payload)
        .await?;
    Ok(Json(json!({
        "message": "Profile updated successfully",
        "user": UserProfile::from(updated),
    })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/users/profile", get(get_profile).put(update_profile))
}

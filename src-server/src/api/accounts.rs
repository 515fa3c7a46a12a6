use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};
use serde_json::json;

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::main_lib::AppState;
use crate::models::{Account, AccountUpdate, NewAccount};

#[utoipa::path(get, path = "/api/v1/accounts", responses((status = 200, body = [Account])))]
async fn list_accounts(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
) -> ApiResult<Json<serde_json::Value>> {
    let accounts: Vec<Account> = state
        .account_service
        .get_active_accounts(&current_user.0.id)?
        .into_iter()
        .map(Account::from)
        .collect();
    Ok(Json(json!({
        "accounts": accounts,
        "totalAccounts": accounts.len(),
    })))
}

#[utoipa::path(post, path = "/api/v1/accounts", request_body = NewAccount, responses((status = 200, body = Account)))]
async fn create_account(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<NewAccount>,
) -> ApiResult<Json<serde_json::Value>> {
    let created = state
        .account_service
        .create_account(&current_user.0.id, payload.into())
        .await?;
    Ok(Json(json!({
        "message": "Account created successfully",
        "account": Account::from(created),
    })))
}

async fn get_account(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
) -> ApiResult<Json<Account>> {
    let account = state.account_service.get_account(&current_user.0.id, &id)?;
    Ok(Json(Account::from(account)))
}

#[utoipa::path(put, path = "/api/v1/accounts/{id}", request_body = AccountUpdate, responses((status = 200, body = Account)))]
async fn update_account(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<AccountUpdate>,
) -> ApiResult<Json<serde_json::Value>> {
    let updated = state
        .account_service
        .update_account(&current_user.0.id, &id, payload.into())
        .await?;
    Ok(Json(json!({
        "message": "Account updated successfully",
        "account": Account::from(updated),
    })))
}

#[utoipa::path(delete, path = "/api/v1/accounts/{id}", responses((status = 200)))]
async fn delete_account(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
) -> ApiResult<Json<serde_json::Value>> {
    state
        .account_service
        .delete_account(&current_user.0.id, &id)
        .await?;
    Ok(Json(json!({ "message": "Account deleted successfully" })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route(
            "/accounts/{id}",
            get(get_account).put(update_account).delete(delete_account),
        )
}

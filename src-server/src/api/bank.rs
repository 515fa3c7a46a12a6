use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::main_lib::AppState;
use crate::models::Account;

async fn create_link_token(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
) -> ApiResult<Json<serde_json::Value>> {
    let link_token = state
        .bank_service
        .create_link_token(&current_user.0.id)
        .await?;
    Ok(Json(json!({
        "message": "Link token created successfully",
        "linkToken": link_token.link_token,
        "expiration": link_token.expiration,
    })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExchangeTokenBody {
    public_token: String,
}

async fn exchange_public_token(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
    Json(body): Json<ExchangeTokenBody>,
) -> ApiResult<Json<serde_json::Value>> {
    let created = state
        .bank_service
        .exchange_public_token(&current_user.0.id, &body.public_token)
        .await?;
    let accounts: Vec<Account> = created.into_iter().map(Account::from).collect();
    Ok(Json(json!({
        "message": format!("Successfully linked {} accounts", accounts.len()),
        "accounts": accounts,
    })))
}

async fn sync_transactions(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
) -> ApiResult<Json<serde_json::Value>> {
    let outcome = state
        .bank_service
        .sync_transactions(&current_user.0.id)
        .await?;
    Ok(Json(json!({
        "message": format!(
            "Successfully synced {} transactions",
            outcome.synced_transactions
        ),
        "syncedTransactions": outcome.synced_transactions,
        "syncedAccounts": outcome.synced_accounts,
    })))
}

async fn linked_accounts(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
) -> ApiResult<Json<serde_json::Value>> {
    let accounts: Vec<Account> = state
        .account_service
        .get_linked_accounts(&current_user.0.id)?
        .into_iter()
        .map(Account::from)
        .collect();
    Ok(Json(json!({
        "accounts": accounts,
        "totalAccounts": accounts.len(),
    })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/plaid/create-link-token", post(create_link_token))
        .route("/plaid/exchange-public-token", post(exchange_public_token))
        .route("/plaid/sync-transactions", post(sync_transactions))
        .route("/plaid/linked-accounts", get(linked_accounts))
}

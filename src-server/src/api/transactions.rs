use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::main_lib::AppState;
use fintrack_core::transactions::{
    DateRange, NewTransaction, Transaction, TransactionFilters, TransactionUpdate,
};

async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
    Query(filters): Query<TransactionFilters>,
) -> ApiResult<Json<serde_json::Value>> {
    let transactions = state
        .transaction_service
        .list_transactions(&current_user.0.id, &filters)?;
    Ok(Json(json!({
        "transactions": transactions,
        "count": transactions.len(),
        "offset": filters.offset(),
        "limit": filters.limit(),
    })))
}

async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<NewTransaction>,
) -> ApiResult<Json<serde_json::Value>> {
    let created = state
        .transaction_service
        .create_transaction(&current_user.0.id, payload)
        .await?;
    Ok(Json(json!({
        "message": "Transaction created successfully",
        "transaction": created,
    })))
}

async fn get_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
) -> ApiResult<Json<Transaction>> {
    let transaction = state
        .transaction_service
        .get_transaction(&current_user.0.id, &id)?;
    Ok(Json(transaction))
}

async fn update_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<TransactionUpdate>,
) -> ApiResult<Json<serde_json::Value>> {
    let updated = state
        .transaction_service
        .update_transaction(&current_user.0.id, &id, payload)
        .await?;
    Ok(Json(json!({
        "message": "Transaction updated successfully",
        "transaction": updated,
    })))
}

async fn delete_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
) -> ApiResult<Json<serde_json::Value>> {
    state
        .transaction_service
        .delete_transaction(&current_user.0.id, &id)
        .await?;
    Ok(Json(json!({ "message": "Transaction deleted successfully" })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryQuery {
    start_date: Option<String>,
    end_date: Option<String>,
}

impl SummaryQuery {
    fn into_range(self) -> ApiResult<DateRange> {
        let start_date = match &self.start_date {
            Some(s) => Some(
                chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .map_err(|e| anyhow::anyhow!("Invalid startDate: {}", e))?
                    .and_hms_opt(0, 0, 0)
                    .expect("midnight is valid"),
            ),
            None => None,
        };
        let end_date = match &self.end_date {
            Some(s) => Some(
                chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .map_err(|e| anyhow::anyhow!("Invalid endDate: {}", e))?
                    .and_hms_opt(23, 59, 59)
                    .expect("end of day is valid"),
            ),
            None => None,
        };
        Ok(DateRange {
            start_date,
            end_date,
        })
    }
}

async fn category_summary(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
    Query(query): Query<SummaryQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let period = json!({
        "startDate": query.start_date.clone(),
        "endDate": query.end_date.clone(),
    });
    let range = query.into_range()?;
    let categories = state
        .transaction_service
        .category_summary(&current_user.0.id, &range)?;
    Ok(Json(json!({
        "categories": categories,
        "totalCategories": categories.len(),
        "period": period,
    })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route("/transactions/categories/summary", get(category_summary))
        .route(
            "/transactions/{id}",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
}

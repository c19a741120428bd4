//! Transaction routes.
//!
//! Every write re-syncs the budgets of the affected category/month.

use axum::{
    Router,
    extract::State,
    response::IntoResponse,
    routing::get,
};
use dompet_core::transaction::{TransactionFilter, TransactionInput};
use dompet_db::TransactionRepository;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::response::{created, ok};

/// Creates the transaction routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route(
            "/transactions/{id}",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
}

/// Query parameters for listing transactions.
#[derive(Debug, Default, Deserialize)]
pub struct ListTransactionsQuery {
    /// `YYYY-MM`.
    pub month: Option<String>,
    /// `income` or `expense`.
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    /// Page size.
    pub limit: Option<u64>,
}

fn repository(state: &AppState) -> TransactionRepository {
    TransactionRepository::new((*state.db).clone())
}

/// GET /transactions - Newest first.
async fn list_transactions(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListTransactionsQuery>,
) -> ApiResult<impl IntoResponse> {
    let filter = TransactionFilter::from_query(
        query.month.as_deref(),
        query.transaction_type.as_deref(),
        query.limit,
    )?;
    Ok(ok(repository(&state).list(filter).await?))
}

/// POST /transactions
async fn create_transaction(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<TransactionInput>,
) -> ApiResult<impl IntoResponse> {
    let input = payload.validate()?;
    let transaction = repository(&state).create(input).await?;

    info!(
        transaction_id = %transaction.id,
        category_id = %transaction.category_id,
        month = %transaction.month,
        "Transaction created"
    );
    Ok(created(transaction))
}

/// GET /transactions/{id}
async fn get_transaction(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let transaction = repository(&state)
        .find(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Transaction not found: {id}")))?;
    Ok(ok(transaction))
}

/// PUT /transactions/{id}
async fn update_transaction(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<TransactionInput>,
) -> ApiResult<impl IntoResponse> {
    let input = payload.validate()?;
    let transaction = repository(&state).update(id, input).await?;

    info!(transaction_id = %id, "Transaction updated");
    Ok(ok(transaction))
}

/// DELETE /transactions/{id}
async fn delete_transaction(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<impl IntoResponse> {
    repository(&state).delete(id).await?;

    info!(transaction_id = %id, "Transaction deleted");
    Ok(ok(serde_json::json!({ "id": id })))
}

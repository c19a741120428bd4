//! Budget routes.

use axum::{
    Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use dompet_core::budget::{BudgetInput, CopyBudgetsInput};
use dompet_core::period::MonthKey;
use dompet_db::BudgetRepository;
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::response::{created, ok};

/// Creates the budget routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budgets", get(list_budgets).post(create_budget))
        .route("/budgets/copy", post(copy_budgets))
        .route(
            "/budgets/{id}",
            get(get_budget).put(update_budget).delete(delete_budget),
        )
}

/// Query parameters for listing budgets.
#[derive(Debug, Default, Deserialize)]
pub struct ListBudgetsQuery {
    /// `YYYY-MM`.
    pub month: Option<String>,
}

fn repository(state: &AppState) -> BudgetRepository {
    BudgetRepository::new((*state.db).clone())
}

/// GET /budgets - Newest month first.
async fn list_budgets(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListBudgetsQuery>,
) -> ApiResult<impl IntoResponse> {
    let month = query
        .month
        .as_deref()
        .map(str::parse::<MonthKey>)
        .transpose()?;
    Ok(ok(repository(&state).list(month).await?))
}

/// POST /budgets - Saves a budget and, if flagged, its next-month copy.
async fn create_budget(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<BudgetInput>,
) -> ApiResult<impl IntoResponse> {
    let input = payload.validate()?;
    let result = repository(&state).create(input).await?;

    info!(
        budget_id = %result.budget.id,
        month = %result.budget.month,
        carried_forward = result.carried_forward.is_some(),
        "Budget created"
    );
    Ok(created(result))
}

async fn get_budget(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let budget = repository(&state)
        .find(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Budget not found: {id}")))?;
    Ok(ok(budget))
}

async fn update_budget(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<BudgetInput>,
) -> ApiResult<impl IntoResponse> {
    let input = payload.validate()?;
    let budget = repository(&state).update(id, input).await?;

    info!(budget_id = %id, status = budget.status.as_str(), "Budget updated");
    Ok(ok(budget))
}

/// DELETE /budgets/{id} - Deleting an original also deletes its copies.
async fn delete_budget(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let deleted = repository(&state).delete(id).await?;

    info!(budget_id = %id, deleted, "Budget deleted");
    Ok(ok(json!({ "id": id, "deleted": deleted })))
}

/// POST /budgets/copy - Clones one month's budgets into another.
async fn copy_budgets(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CopyBudgetsInput>,
) -> ApiResult<impl IntoResponse> {
    let (from, to) = payload.validate()?;
    let copied = repository(&state).copy_month(from, to).await?;

    info!(%from, %to, copied = copied.len(), "Budgets copied");
    Ok(created(copied))
}

//! Dashboard analytics route.

use axum::{
    Router,
    extract::State,
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;
use dompet_core::dashboard::DashboardService;
use dompet_core::period::{MonthKey, PeriodFilter};
use dompet_db::{BudgetRepository, CategoryRepository, TransactionRepository};
use serde::Deserialize;

use crate::AppState;
use crate::error::ApiResult;
use crate::extract::ApiQuery;
use crate::response::ok;

/// Creates the dashboard routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(get_dashboard))
}

/// Query parameters for the dashboard.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// `this-month` (default), `last-month` or `all`.
    pub period: Option<String>,
    /// Year of the monthly buckets; defaults to the current year.
    pub year: Option<i32>,
}

/// GET /dashboard
async fn get_dashboard(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DashboardQuery>,
) -> ApiResult<impl IntoResponse> {
    let filter = query
        .period
        .as_deref()
        .map(str::parse::<PeriodFilter>)
        .transpose()?
        .unwrap_or_default();
    let now = Utc::now();
    let db = (*state.db).clone();

    let transactions = TransactionRepository::new(db.clone()).list_all().await?;
    let budgets = BudgetRepository::new(db.clone())
        .list(Some(MonthKey::from_datetime(now)))
        .await?;
    let category_names = CategoryRepository::new(db).names().await?;

    Ok(ok(DashboardService::build(
        &transactions,
        &budgets,
        &category_names,
        filter,
        query.year,
        now,
    )))
}

//! Category routes.

use axum::{
    Router,
    extract::State,
    response::IntoResponse,
    routing::{get, put},
};
use dompet_core::category::{CategoryInput, build_tree};
use dompet_db::CategoryRepository;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::response::{created, ok};

/// Creates the category routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/tree", get(category_tree))
        .route(
            "/categories/{id}",
            put(update_category).delete(delete_category),
        )
}

fn repository(state: &AppState) -> CategoryRepository {
    CategoryRepository::new((*state.db).clone())
}

async fn list_categories(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    Ok(ok(repository(&state).list().await?))
}

/// GET /categories/tree - Parents with nested children, plus orphans.
async fn category_tree(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let categories = repository(&state).list().await?;
    Ok(ok(build_tree(categories)))
}

async fn create_category(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CategoryInput>,
) -> ApiResult<impl IntoResponse> {
    let input = payload.validate_create()?;
    let category = repository(&state).create(input).await?;

    info!(category_id = %category.id, name = %category.name, "Category created");
    Ok(created(category))
}

async fn update_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<CategoryInput>,
) -> ApiResult<impl IntoResponse> {
    let input = payload.validate_update(id)?;
    let category = repository(&state).update(id, input).await?;

    info!(category_id = %id, "Category updated");
    Ok(ok(category))
}

/// DELETE /categories/{id} - Refused while the category has children.
async fn delete_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<impl IntoResponse> {
    repository(&state).delete(id).await?;

    info!(category_id = %id, "Category deleted");
    Ok(ok(json!({ "id": id })))
}

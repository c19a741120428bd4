//! Role routes.
//!
//! Reads need an authenticated caller; writes need `add-role` or `edit-role`.

use axum::{
    Router,
    extract::State,
    response::IntoResponse,
    routing::get,
};
use dompet_core::role::{RoleAccessInput, RoleInput};
use dompet_db::RoleRepository;
use serde_json::json;
use tracing::info;

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::{AuthUser, require_permission};
use crate::response::{created, ok};

/// Creates the role routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/roles", get(list_roles).post(create_role))
        .route(
            "/roles/{name}",
            get(get_role).put(update_role).delete(delete_role),
        )
}

fn repository(state: &AppState) -> RoleRepository {
    RoleRepository::new((*state.db).clone())
}

async fn list_roles(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    Ok(ok(repository(&state).list().await?))
}

async fn get_role(
    State(state): State<AppState>,
    ApiPath(name): ApiPath<String>,
) -> ApiResult<impl IntoResponse> {
    let role = repository(&state)
        .find(&name)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Role '{name}' not found")))?;
    Ok(ok(role))
}

/// POST /roles - Creates a role, or replaces the access of an existing one.
async fn create_role(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<RoleInput>,
) -> ApiResult<impl IntoResponse> {
    require_permission(&state, &user, "add-role").await?;

    let input = payload.validate()?;
    let role = repository(&state).upsert(input).await?;

    info!(role = %role.name, by = %user.uid(), "Role saved");
    Ok(created(role))
}

async fn update_role(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(name): ApiPath<String>,
    ApiJson(payload): ApiJson<RoleAccessInput>,
) -> ApiResult<impl IntoResponse> {
    require_permission(&state, &user, "edit-role").await?;

    let role = repository(&state)
        .update_access(&name, payload.normalized())
        .await?;

    info!(role = %name, by = %user.uid(), "Role access updated");
    Ok(ok(role))
}

async fn delete_role(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(name): ApiPath<String>,
) -> ApiResult<impl IntoResponse> {
    require_permission(&state, &user, "edit-role").await?;

    repository(&state).delete(&name).await?;

    info!(role = %name, by = %user.uid(), "Role deleted");
    Ok(ok(json!({ "name": name })))
}

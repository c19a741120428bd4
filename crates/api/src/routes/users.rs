//! User administration routes.

use axum::{
    Router,
    extract::State,
    response::IntoResponse,
    routing::{get, put},
};
use dompet_core::auth::hash_password;
use dompet_core::user::{CreateUserInput, UpdateUserInput};
use dompet_db::UserRepository;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::{AuthUser, require_permission};
use crate::response::{created, ok};

/// Creates the user routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{uid}", put(update_user).delete(delete_user))
}

fn repository(state: &AppState) -> UserRepository {
    UserRepository::new((*state.db).clone())
}

async fn list_users(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<impl IntoResponse> {
    require_permission(&state, &user, "edit-users").await?;
    Ok(ok(repository(&state).list().await?))
}

async fn create_user(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<CreateUserInput>,
) -> ApiResult<impl IntoResponse> {
    require_permission(&state, &user, "add-users").await?;

    let input = payload.validate()?;
    let password_hash = hash_password(&input.password)?;
    let created_user = repository(&state).create(input, &password_hash).await?;

    info!(uid = %created_user.uid, by = %user.uid(), "User created");
    Ok(created(created_user))
}

/// PUT /users/{uid} - Absent fields are left untouched.
async fn update_user(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(uid): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateUserInput>,
) -> ApiResult<impl IntoResponse> {
    require_permission(&state, &user, "edit-users").await?;

    let changes = payload.validate()?;
    let password_hash = changes
        .new_password
        .as_deref()
        .map(hash_password)
        .transpose()?;
    let updated = repository(&state).update(uid, changes, password_hash).await?;

    info!(%uid, by = %user.uid(), "User updated");
    Ok(ok(updated))
}

async fn delete_user(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(uid): ApiPath<Uuid>,
) -> ApiResult<impl IntoResponse> {
    require_permission(&state, &user, "edit-users").await?;

    repository(&state).delete(uid).await?;

    info!(%uid, by = %user.uid(), "User deleted");
    Ok(ok(json!({ "uid": uid })))
}

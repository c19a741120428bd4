//! Session routes: login, logout and the caller's access list.

use axum::{
    Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use dompet_core::auth::verify_password;
use dompet_core::user::normalize_email;
use dompet_db::{AccessRepository, UserRepository};
use dompet_shared::auth::{AccessResponse, LoginRequest, LoginResponse, SessionUser};
use tracing::{info, warn};

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::extract::ApiJson;
use crate::middleware::AuthUser;
use crate::response::ok;

/// Public session routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

/// Session routes that need an authenticated caller.
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/auth/me", get(me))
}

fn session_cookie(name: String, token: String) -> Cookie<'static> {
    Cookie::build((name, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .build()
}

/// POST /auth/login - Verify credentials and start a session.
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let invalid = || ApiError::unauthorized("Invalid email or password");

    let email = normalize_email(&payload.email).map_err(|_| invalid())?;
    let user = UserRepository::new((*state.db).clone())
        .find_by_email(&email)
        .await?
        .ok_or_else(|| {
            info!(%email, "Login attempt for non-existent user");
            invalid()
        })?;

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(uid = %user.uid, "Login attempt with wrong password");
        return Err(invalid());
    }

    let token = state.jwt_service.issue_session_token(user.uid, &user.email)?;
    let jar = jar.add(session_cookie(
        state.auth.session_cookie.clone(),
        token.clone(),
    ));

    info!(uid = %user.uid, "User logged in");
    let body = LoginResponse {
        user: SessionUser {
            uid: user.uid,
            email: user.email,
            role: user.role,
        },
        token,
        expires_in: state.jwt_service.token_expires_in(),
    };
    Ok((jar, ok(body)))
}

/// POST /auth/logout - Clear the session cookie.
async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = jar.remove(
        Cookie::build((state.auth.session_cookie.clone(), String::new())).path("/"),
    );
    (jar, ok(serde_json::Value::Null))
}

/// GET /auth/me - The caller's role and access list.
async fn me(State(state): State<AppState>, user: AuthUser) -> ApiResult<impl IntoResponse> {
    let resolved = AccessRepository::new((*state.db).clone())
        .resolve(user.uid())
        .await?;

    Ok(ok(AccessResponse {
        uid: resolved.user.uid,
        email: resolved.user.email,
        role: resolved.role.name,
        access: resolved.role.access,
    }))
}

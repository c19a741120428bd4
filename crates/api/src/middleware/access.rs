//! Page access guard.
//!
//! Requests under a guarded prefix need a session cookie whose user holds a
//! role granting the mapped permission. Every failure is the same redirect;
//! the reason is only logged.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use dompet_core::access::{AccessDecision, AccessDenied};
use dompet_db::{AccessRepository, repositories::AccessLookupError};
use tracing::{debug, warn};

use crate::AppState;

/// Guards page prefixes listed in the route access table.
pub async fn page_guard(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let AccessDecision::Requires(permission) = state.auth.route_access.resolve(&path) else {
        return next.run(request).await;
    };

    match check_page_access(&state, &jar, &path).await {
        Ok(()) => next.run(request).await,
        Err(reason) => {
            match &reason {
                AccessDenied::Lookup(_) => warn!(%path, permission, %reason, "Page access denied"),
                _ => debug!(%path, permission, %reason, "Page access denied"),
            }
            Redirect::to(&state.auth.redirect_to).into_response()
        }
    }
}

async fn check_page_access(
    state: &AppState,
    jar: &CookieJar,
    path: &str,
) -> Result<(), AccessDenied> {
    let token = jar
        .get(&state.auth.session_cookie)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
        .ok_or(AccessDenied::MissingToken)?;

    let claims = state
        .jwt_service
        .validate_token(&token)
        .map_err(|e| AccessDenied::InvalidToken(e.to_string()))?;

    let resolved = AccessRepository::new((*state.db).clone())
        .resolve(claims.uid())
        .await
        .map_err(|e| match e {
            AccessLookupError::UserNotFound => AccessDenied::UserNotFound,
            AccessLookupError::NoRole => AccessDenied::NoRole,
            AccessLookupError::RoleNotFound(role) => AccessDenied::RoleNotFound(role),
            AccessLookupError::Database(err) => AccessDenied::Lookup(err.to_string()),
        })?;

    state
        .auth
        .route_access
        .authorize(path, &resolved.role.access)
}

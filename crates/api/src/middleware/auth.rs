//! Authentication middleware for protected API routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use dompet_db::AccessRepository;
use dompet_db::repositories::{AccessLookupError, ResolvedAccess};
use dompet_shared::Claims;
use tracing::debug;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiError;

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
}

/// Session token from the Authorization header, else from the session cookie.
pub(crate) fn session_token(headers: &HeaderMap, jar: &CookieJar, cookie: &str) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer_token)
        .map(str::to_string)
        .or_else(|| jar.get(cookie).map(|c| c.value().to_string()))
        .filter(|token| !token.is_empty())
}

/// Authentication middleware that validates session tokens.
///
/// Accepts `Authorization: Bearer <token>` or the session cookie and stores
/// the verified claims in request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = session_token(request.headers(), &jar, &state.auth.session_cookie) else {
        return ApiError::unauthorized("Bearer token or session cookie is required")
            .into_response();
    };

    match state.jwt_service.validate_token(&token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Extractor for authenticated user claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Returns the user ID from the claims.
    #[must_use]
    pub fn uid(&self) -> Uuid {
        self.0.uid()
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}

/// Resolves the caller's role and checks it grants `permission`.
///
/// A broken user → role chain is treated as a missing permission.
pub async fn require_permission(
    state: &AppState,
    user: &AuthUser,
    permission: &str,
) -> Result<ResolvedAccess, ApiError> {
    let resolved = AccessRepository::new((*state.db).clone())
        .resolve(user.uid())
        .await
        .map_err(|e| match e {
            AccessLookupError::Database(err) => ApiError::from(err),
            other => {
                debug!(uid = %user.uid(), reason = %other, "Access lookup failed");
                ApiError::forbidden(format!("Missing permission '{permission}'"))
            }
        })?;

    if resolved.grants(permission) {
        Ok(resolved)
    } else {
        debug!(uid = %user.uid(), permission, "Permission denied");
        Err(ApiError::forbidden(format!("Missing permission '{permission}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use axum_extra::extract::cookie::Cookie;

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(extract_bearer_token("bearer abc"), Some("abc"));
        assert_eq!(extract_bearer_token("Basic abc"), None);
    }

    #[test]
    fn test_header_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        let jar = CookieJar::new().add(Cookie::new("session", "from-cookie"));

        assert_eq!(
            session_token(&headers, &jar, "session").as_deref(),
            Some("from-header")
        );
        assert_eq!(
            session_token(&HeaderMap::new(), &jar, "session").as_deref(),
            Some("from-cookie")
        );
        assert_eq!(session_token(&HeaderMap::new(), &jar, "other"), None);
    }
}

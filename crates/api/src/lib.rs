//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes under `/api`
//! - Session authentication and permission checks
//! - The page access guard in front of the static front-end
//! - Response envelopes

pub mod error;
pub mod extract;
pub mod middleware;
pub mod response;
pub mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use dompet_core::access::RouteAccessTable;
use dompet_shared::JwtService;
use dompet_shared::config::AuthConfig;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Session cookie and page guard settings.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    /// Name of the cookie carrying the session token.
    pub session_cookie: String,
    /// Where denied page requests are redirected.
    pub redirect_to: String,
    /// Path → permission table.
    pub route_access: RouteAccessTable,
}

impl From<AuthConfig> for AuthSettings {
    fn from(config: AuthConfig) -> Self {
        Self {
            session_cookie: config.session_cookie,
            redirect_to: config.redirect_to,
            route_access: RouteAccessTable::new(config.route_access),
        }
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        AuthConfig::default().into()
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for session tokens.
    pub jwt_service: Arc<JwtService>,
    /// Session cookie and page guard settings.
    pub auth: Arc<AuthSettings>,
    /// Built front-end served behind the page guard.
    pub static_dir: Option<PathBuf>,
}

impl AppState {
    /// Creates the state.
    #[must_use]
    pub fn new(db: DatabaseConnection, jwt_service: JwtService, auth: AuthSettings) -> Self {
        Self {
            db: Arc::new(db),
            jwt_service: Arc::new(jwt_service),
            auth: Arc::new(auth),
            static_dir: None,
        }
    }

    /// Serves static pages from `dir`.
    #[must_use]
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }
}

/// Creates the main application router.
///
/// Page requests outside `/api` fall through to the static directory, or to
/// a 404 when none is configured; both sit behind the page guard.
pub fn create_router(state: AppState) -> Router {
    let router = Router::new().nest("/api", routes::api_routes_with_state(state.clone()));

    let router = match &state.static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router.fallback(|| async { StatusCode::NOT_FOUND }),
    };

    router
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::page_guard,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

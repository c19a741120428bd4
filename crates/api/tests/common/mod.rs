//! Shared setup for router-level tests.

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use dompet_api::{AppState, AuthSettings, create_router};
use dompet_core::role::ValidRole;
use dompet_core::user::NewUser;
use dompet_db::{RoleRepository, UserRepository};
use dompet_shared::{JwtConfig, JwtService};
use http_body_util::BodyExt;
use sea_orm::{Database, DatabaseConnection};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub const COOKIE: &str = "firebaseToken";

pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
    pub jwt: JwtService,
}

pub async fn test_app() -> TestApp {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    dompet_db::migrate(&db)
        .await
        .expect("Failed to run migrations");

    let jwt = JwtService::new(JwtConfig {
        secret: "api-test-secret".to_string(),
        token_expires_secs: 3600,
    });
    let state = AppState::new(db.clone(), jwt.clone(), AuthSettings::default());

    TestApp {
        router: create_router(state),
        db,
        jwt,
    }
}

impl TestApp {
    /// Creates a role and a user holding it; returns a session token.
    pub async fn user_with_access(&self, email: &str, access: &[&str]) -> (Uuid, String) {
        let role_name = format!("role-{email}");
        RoleRepository::new(self.db.clone())
            .upsert(ValidRole {
                name: role_name.clone(),
                access: access.iter().map(ToString::to_string).collect(),
            })
            .await
            .expect("role");

        let user = UserRepository::new(self.db.clone())
            .create(
                NewUser {
                    email: email.to_string(),
                    password: "unused".to_string(),
                    display_name: None,
                    role: role_name,
                },
                "$argon2id$not-a-real-hash",
            )
            .await
            .expect("user");

        let token = self
            .jwt
            .issue_session_token(user.uid, email)
            .expect("token");
        (user.uid, token)
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }
}

pub fn page(path: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::get(path);
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("{COOKIE}={token}"));
    }
    builder.body(Body::empty()).expect("request")
}

pub fn api(method: &str, path: &str, token: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(path)
        .header(header::AUTHORIZATION, format!("Bearer {token}"));
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request")
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

//! End-to-end API behaviour through the router.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::{api, json_body, test_app};
use serde_json::json;

#[tokio::test]
async fn test_health_is_public() {
    let app = test_app().await;

    let response = app
        .send(Request::get("/api/health").body(Body::empty()).unwrap())
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["data"]["status"], "healthy");
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = test_app().await;

    let response = app
        .send(Request::get("/api/transactions").body(Body::empty()).unwrap())
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_bad_token_is_unauthorized() {
    let app = test_app().await;

    let response = app
        .send(api("GET", "/api/categories", "garbage", None))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_user_admin_needs_permission() {
    let app = test_app().await;
    let (_, token) = app
        .user_with_access("viewer@example.com", &["dashboard"])
        .await;

    let list = app.send(api("GET", "/api/users", &token, None)).await;
    assert_eq!(list.status(), StatusCode::FORBIDDEN);

    let create = app
        .send(api(
            "POST",
            "/api/roles",
            &token,
            Some(json!({ "name": "auditor", "access": ["dashboard"] })),
        ))
        .await;
    assert_eq!(create.status(), StatusCode::FORBIDDEN);
    assert_eq!(json_body(create).await["error"], "FORBIDDEN");
}

#[tokio::test]
async fn test_admin_creates_user() {
    let app = test_app().await;
    let (_, token) = app
        .user_with_access("admin@example.com", &["add-users", "edit-users"])
        .await;

    let response = app
        .send(api(
            "POST",
            "/api/users",
            &token,
            Some(json!({
                "email": "New.Staff@Example.com",
                "password": "rahasia123",
                "role": "role-admin@example.com"
            })),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["data"]["email"], "new.staff@example.com");
    assert!(body["data"].get("passwordHash").is_none());

    let short = app
        .send(api(
            "POST",
            "/api/users",
            &token,
            Some(json!({ "email": "x@example.com", "password": "123", "role": "role-admin@example.com" })),
        ))
        .await;
    assert_eq!(short.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_me_returns_access_list() {
    let app = test_app().await;
    let (uid, token) = app
        .user_with_access("me@example.com", &["dashboard", "budget"])
        .await;

    let response = app.send(api("GET", "/api/auth/me", &token, None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["uid"], uid.to_string());
    assert_eq!(body["data"]["access"], json!(["dashboard", "budget"]));
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let app = test_app().await;
    let hash = dompet_core::auth::hash_password("rahasia123").unwrap();
    dompet_db::RoleRepository::new(app.db.clone())
        .upsert(dompet_core::role::ValidRole {
            name: "owner".to_string(),
            access: vec!["dashboard".to_string()],
        })
        .await
        .unwrap();
    dompet_db::UserRepository::new(app.db.clone())
        .create(
            dompet_core::user::NewUser {
                email: "owner@example.com".to_string(),
                password: "rahasia123".to_string(),
                display_name: None,
                role: "owner".to_string(),
            },
            &hash,
        )
        .await
        .unwrap();

    let login = |password: &str| {
        Request::post("/api/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({ "email": "owner@example.com", "password": password }).to_string(),
            ))
            .unwrap()
    };

    let wrong = app.send(login("wrong-password")).await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let response = app.send(login("rahasia123")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("firebaseToken="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));

    let body = json_body(response).await;
    let token = body["data"]["token"].as_str().unwrap();
    assert!(app.jwt.validate_token(token).is_ok());
}

#[tokio::test]
async fn test_food_budget_reaches_warning() {
    let app = test_app().await;
    let (_, token) = app.user_with_access("owner@example.com", &[]).await;

    let category = json_body(
        app.send(api(
            "POST",
            "/api/categories",
            &token,
            Some(json!({ "name": "Food", "type": "expense" })),
        ))
        .await,
    )
    .await;
    let category_id = category["data"]["id"].as_str().unwrap().to_string();

    let created = app
        .send(api(
            "POST",
            "/api/budgets",
            &token,
            Some(json!({
                "categoryId": category_id,
                "categoryName": "Food",
                "limit": 1_000_000,
                "month": "2025-06"
            })),
        ))
        .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let budget_id = json_body(created).await["data"]["budget"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let expense = app
        .send(api(
            "POST",
            "/api/transactions",
            &token,
            Some(json!({
                "amount": 900_000,
                "type": "expense",
                "categoryId": category_id,
                "date": "2025-06-10"
            })),
        ))
        .await;
    assert_eq!(expense.status(), StatusCode::CREATED);

    let budget = json_body(
        app.send(api("GET", &format!("/api/budgets/{budget_id}"), &token, None))
            .await,
    )
    .await;
    assert_eq!(budget["data"]["used"], 900_000);
    assert_eq!(budget["data"]["remaining"], 100_000);
    assert_eq!(budget["data"]["status"], "warning");
}

#[tokio::test]
async fn test_validation_errors_use_envelope() {
    let app = test_app().await;
    let (_, token) = app.user_with_access("owner@example.com", &[]).await;

    let response = app
        .send(api(
            "GET",
            "/api/transactions?month=2025-13",
            &token,
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_dashboard_defaults_to_this_month() {
    let app = test_app().await;
    let (_, token) = app.user_with_access("owner@example.com", &[]).await;

    let response = app.send(api("GET", "/api/dashboard", &token, None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["period"], "this-month");
    assert_eq!(body["data"]["yearly"].as_array().map(Vec::len), Some(12));
}

#[tokio::test]
async fn test_out_of_range_months_are_rejected_and_lists_stay_readable() {
    let app = test_app().await;
    let (_, token) = app.user_with_access("owner@example.com", &[]).await;
    let category_id = uuid::Uuid::new_v4().to_string();

    let budget = app
        .send(api(
            "POST",
            "/api/budgets",
            &token,
            Some(json!({
                "categoryId": category_id,
                "categoryName": "Food",
                "limit": 1_000,
                "month": "9999-12",
                "continueNextMonth": true
            })),
        ))
        .await;
    assert_eq!(budget.status(), StatusCode::BAD_REQUEST);

    let transaction = app
        .send(api(
            "POST",
            "/api/transactions",
            &token,
            Some(json!({
                "amount": 500,
                "type": "expense",
                "categoryId": category_id,
                "date": "+12345-06-10"
            })),
        ))
        .await;
    assert_eq!(transaction.status(), StatusCode::BAD_REQUEST);

    for path in ["/api/budgets", "/api/transactions", "/api/dashboard?period=all"] {
        let response = app.send(api("GET", path, &token, None)).await;
        assert_eq!(response.status(), StatusCode::OK, "{path}");
    }
}

#[tokio::test]
async fn test_malformed_requests_use_error_envelope() {
    let app = test_app().await;
    let (_, token) = app.user_with_access("owner@example.com", &[]).await;

    let bad_id = app
        .send(api("GET", "/api/budgets/not-a-uuid", &token, None))
        .await;
    assert_eq!(bad_id.status(), StatusCode::BAD_REQUEST);
    let body = json_body(bad_id).await;
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "VALIDATION_ERROR");

    let no_body = app
        .send(api("POST", "/api/transactions", &token, None))
        .await;
    assert_eq!(no_body.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(no_body).await["error"], "VALIDATION_ERROR");
}

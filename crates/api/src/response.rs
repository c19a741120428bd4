//! Success envelope: `{ "ok": true, "data": ... }`.

use axum::{Json, http::StatusCode};
use serde::Serialize;

/// Success body sent to clients.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Always `true`.
    pub ok: bool,
    /// Payload.
    pub data: T,
}

/// Wraps `data` in a 200 envelope.
pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse { ok: true, data })
}

/// Wraps `data` in a 201 envelope.
pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<ApiResponse<T>>) {
    (StatusCode::CREATED, ok(data))
}

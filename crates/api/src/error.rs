//! API error responses.
//!
//! Every handler error ends up as an [`AppError`] wrapped in [`ApiError`],
//! rendered as `{ "ok": false, "error": CODE, "message": text }`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dompet_core::{auth::PasswordError, budget, category, period::PeriodError, role, transaction, user};
use dompet_db::repositories::{
    AccessLookupError, BudgetError, CategoryError, RoleError, TransactionError, UserError,
};
use dompet_shared::{AppError, JwtError};
use sea_orm::DbErr;
use serde::Serialize;
use tracing::error;

/// Error body sent to clients.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Always `false`.
    pub ok: bool,
    /// Stable error code.
    pub error: &'static str,
    /// Human-readable message.
    pub message: String,
}

/// Handler error wrapping the application taxonomy.
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// 401 with the given message.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self(AppError::Unauthorized(message.into()))
    }

    /// 403 with the given message.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self(AppError::Forbidden(message.into()))
    }

    /// 404 with the given message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self(AppError::NotFound(message.into()))
    }

    /// 400 with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self(AppError::Validation(message.into()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.0.is_server_error() {
            error!(error = %self.0, "Request failed");
        }

        let body = ErrorBody {
            ok: false,
            error: self.0.error_code(),
            message: self.0.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => Self::unauthorized("Token has expired"),
            JwtError::DecodingError(_) => Self::unauthorized("Invalid or malformed token"),
            JwtError::EncodingError(msg) => Self(AppError::Internal(msg)),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::TooShort => Self::validation(err.to_string()),
            other => Self(AppError::Internal(other.to_string())),
        }
    }
}

impl From<PeriodError> for ApiError {
    fn from(err: PeriodError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<category::CategoryError> for ApiError {
    fn from(err: category::CategoryError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<transaction::TransactionError> for ApiError {
    fn from(err: transaction::TransactionError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<budget::BudgetError> for ApiError {
    fn from(err: budget::BudgetError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<role::RoleError> for ApiError {
    fn from(err: role::RoleError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<user::UserError> for ApiError {
    fn from(err: user::UserError) -> Self {
        match err {
            user::UserError::Password(inner) => inner.into(),
            other => Self::validation(other.to_string()),
        }
    }
}

impl From<CategoryError> for ApiError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::NotFound(_) => Self::not_found(err.to_string()),
            CategoryError::HasChildren => Self::validation(err.to_string()),
            CategoryError::Database(e) => e.into(),
        }
    }
}

impl From<TransactionError> for ApiError {
    fn from(err: TransactionError) -> Self {
        match err {
            TransactionError::NotFound(_) => Self::not_found(err.to_string()),
            TransactionError::Database(e) => e.into(),
        }
    }
}

impl From<BudgetError> for ApiError {
    fn from(err: BudgetError) -> Self {
        match err {
            BudgetError::NotFound(_) => Self::not_found(err.to_string()),
            BudgetError::Invalid(rule) => rule.into(),
            BudgetError::Database(e) => e.into(),
        }
    }
}

impl From<RoleError> for ApiError {
    fn from(err: RoleError) -> Self {
        match err {
            RoleError::NotFound(_) => Self::not_found(err.to_string()),
            RoleError::Database(e) => e.into(),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => Self::not_found(err.to_string()),
            UserError::EmailTaken => Self(AppError::Conflict(err.to_string())),
            UserError::UnknownRole(_) => Self::validation(err.to_string()),
            UserError::Database(e) => e.into(),
        }
    }
}

impl From<AccessLookupError> for ApiError {
    fn from(err: AccessLookupError) -> Self {
        match err {
            AccessLookupError::UserNotFound | AccessLookupError::RoleNotFound(_) => {
                Self::not_found(err.to_string())
            }
            AccessLookupError::NoRole => Self::validation(err.to_string()),
            AccessLookupError::Database(e) => e.into(),
        }
    }
}

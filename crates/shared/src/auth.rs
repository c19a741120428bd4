//! Authentication types for session tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims carried by the session token.
///
/// The role is deliberately not embedded: it is resolved from the user
/// record on every check so role edits take effect immediately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user uid).
    pub sub: Uuid,
    /// Email at the time the token was issued.
    pub email: String,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(uid: Uuid, email: &str, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: uid,
            email: email.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user uid from claims.
    #[must_use]
    pub const fn uid(&self) -> Uuid {
        self.sub
    }
}

/// Login request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// User email.
    pub email: String,
    /// User password.
    pub password: String,
}

/// Login response payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Authenticated user info.
    pub user: SessionUser,
    /// Session token (also set as cookie).
    pub token: String,
    /// Token expiration in seconds.
    pub expires_in: i64,
}

/// User info returned in auth responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    /// User uid.
    pub uid: Uuid,
    /// User email.
    pub email: String,
    /// Assigned role name, if any.
    pub role: Option<String>,
}

/// Role and permission set of the current caller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessResponse {
    /// User uid.
    pub uid: Uuid,
    /// User email.
    pub email: String,
    /// Role name.
    pub role: String,
    /// Permission tokens granted by the role.
    pub access: Vec<String>,
}

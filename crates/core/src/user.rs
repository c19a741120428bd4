//! Local identity records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::{PasswordError, check_password_policy};

/// User validation errors.
#[derive(Debug, Error)]
pub enum UserError {
    /// A required field is absent or blank.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Email is not shaped like an address.
    #[error("Invalid email address")]
    InvalidEmail,

    /// Password policy or hashing failure.
    #[error(transparent)]
    Password(#[from] PasswordError),
}

/// A user as returned to clients. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User ID.
    pub uid: Uuid,
    /// Login email, lower-cased.
    pub email: String,
    /// Optional display name.
    pub display_name: Option<String>,
    /// Role name.
    pub role: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Create payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserInput {
    /// Login email.
    pub email: Option<String>,
    /// Plain password.
    pub password: Option<String>,
    /// Optional display name.
    pub display_name: Option<String>,
    /// Role name; must exist.
    pub role: Option<String>,
}

/// Validated create payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Normalized email.
    pub email: String,
    /// Plain password, hashed by the caller.
    pub password: String,
    /// Display name.
    pub display_name: Option<String>,
    /// Role name.
    pub role: String,
}

/// Edit payload; absent or blank fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserInput {
    /// New email.
    pub email: Option<String>,
    /// New display name.
    pub display_name: Option<String>,
    /// New role name; must exist.
    pub role: Option<String>,
    /// New password; ignored when blank.
    pub new_password: Option<String>,
}

/// Validated edit payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    /// Normalized email.
    pub email: Option<String>,
    /// Display name.
    pub display_name: Option<String>,
    /// Role name.
    pub role: Option<String>,
    /// Plain password, hashed by the caller.
    pub new_password: Option<String>,
}

impl UserChanges {
    /// Returns true if nothing would be written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.display_name.is_none()
            && self.role.is_none()
            && self.new_password.is_none()
    }
}

/// Trims and lower-cases an email, rejecting obviously malformed ones.
///
/// # Errors
///
/// Returns `UserError::InvalidEmail` unless the address has a non-empty local
/// part and a dotted domain.
pub fn normalize_email(raw: &str) -> Result<String, UserError> {
    let email = raw.trim().to_lowercase();
    let (local, domain) = email.split_once('@').ok_or(UserError::InvalidEmail)?;

    let domain_ok = domain
        .split_once('.')
        .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty());
    if local.is_empty() || !domain_ok || email.chars().any(char::is_whitespace) {
        return Err(UserError::InvalidEmail);
    }
    Ok(email)
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl CreateUserInput {
    /// Validates the payload.
    ///
    /// # Errors
    ///
    /// Returns `UserError::MissingField`, `InvalidEmail`, or a password
    /// policy error.
    pub fn validate(self) -> Result<NewUser, UserError> {
        let email = present(self.email).ok_or(UserError::MissingField("email"))?;
        let password = self
            .password
            .filter(|p| !p.is_empty())
            .ok_or(UserError::MissingField("password"))?;
        let role = present(self.role).ok_or(UserError::MissingField("role"))?;

        check_password_policy(&password)?;

        Ok(NewUser {
            email: normalize_email(&email)?,
            password,
            display_name: present(self.display_name),
            role,
        })
    }
}

impl UpdateUserInput {
    /// Validates the payload.
    ///
    /// # Errors
    ///
    /// Returns `UserError::InvalidEmail` or a password policy error.
    pub fn validate(self) -> Result<UserChanges, UserError> {
        let email = present(self.email)
            .map(|email| normalize_email(&email))
            .transpose()?;
        let new_password = self.new_password.filter(|p| !p.trim().is_empty());
        if let Some(password) = &new_password {
            check_password_policy(password)?;
        }

        Ok(UserChanges {
            email,
            display_name: present(self.display_name),
            role: present(self.role),
            new_password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn create(email: &str, password: &str, role: &str) -> CreateUserInput {
        CreateUserInput {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
            display_name: None,
            role: Some(role.to_string()),
        }
    }

    #[rstest]
    #[case("Owner@Example.com ", Ok("owner@example.com"))]
    #[case("no-at-sign", Err(()))]
    #[case("@example.com", Err(()))]
    #[case("a@localhost", Err(()))]
    #[case("a b@example.com", Err(()))]
    fn test_normalize_email(#[case] raw: &str, #[case] expected: Result<&str, ()>) {
        assert_eq!(normalize_email(raw).as_deref().map_err(|_| ()), expected);
    }

    #[test]
    fn test_create_requires_role() {
        let input = CreateUserInput {
            role: None,
            ..create("a@example.com", "secret1", "admin")
        };
        assert!(matches!(
            input.validate(),
            Err(UserError::MissingField("role"))
        ));
    }

    #[test]
    fn test_create_short_password() {
        assert!(matches!(
            create("a@example.com", "12345", "admin").validate(),
            Err(UserError::Password(PasswordError::TooShort))
        ));
    }

    #[test]
    fn test_update_ignores_blank_password() {
        let changes = UpdateUserInput {
            new_password: Some("   ".to_string()),
            display_name: Some("Siti".to_string()),
            ..UpdateUserInput::default()
        }
        .validate()
        .unwrap();

        assert_eq!(changes.new_password, None);
        assert_eq!(changes.display_name.as_deref(), Some("Siti"));
        assert!(!changes.is_empty());
        assert!(
            UpdateUserInput::default()
                .validate()
                .unwrap()
                .is_empty()
        );
    }
}

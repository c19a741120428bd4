//! Named permission sets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::access::normalize_access;

/// Role validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoleError {
    /// Name is missing or blank.
    #[error("Role name is required")]
    NameRequired,
}

/// A stored role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    /// Unique role name.
    pub name: String,
    /// Permission tokens, de-duplicated.
    pub access: Vec<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Role {
    /// Returns true if the role grants `permission`.
    #[must_use]
    pub fn grants(&self, permission: &str) -> bool {
        self.access.iter().any(|a| a == permission)
    }
}

/// Create payload. Also accepts the `roleName` / `allowedMenus` spelling.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleInput {
    /// Role name.
    #[serde(alias = "roleName")]
    pub name: Option<String>,
    /// Permission tokens.
    #[serde(default, alias = "allowedMenus")]
    pub access: Vec<String>,
}

/// Access replacement payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleAccessInput {
    /// New permission tokens.
    #[serde(default)]
    pub access: Vec<String>,
}

/// A role payload that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRole {
    /// Trimmed name.
    pub name: String,
    /// Normalized access list.
    pub access: Vec<String>,
}

impl RoleInput {
    /// Validates the payload.
    ///
    /// # Errors
    ///
    /// Returns `RoleError::NameRequired` for a blank name.
    pub fn validate(self) -> Result<ValidRole, RoleError> {
        let name = self
            .name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .ok_or(RoleError::NameRequired)?;

        Ok(ValidRole {
            name,
            access: normalize_access(self.access),
        })
    }
}

impl RoleAccessInput {
    /// Normalized access list.
    #[must_use]
    pub fn normalized(self) -> Vec<String> {
        normalize_access(self.access)
    }
}

//! Resolves a session subject to its role and access list.

use dompet_core::role::Role;
use dompet_core::user::User;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait};
use uuid::Uuid;

use crate::entities::{roles, users};

/// Why an access lookup produced no role.
#[derive(Debug, thiserror::Error)]
pub enum AccessLookupError {
    /// No user record for the subject.
    #[error("User not found in database")]
    UserNotFound,

    /// User record has no role.
    #[error("User has no role assigned")]
    NoRole,

    /// Role record is missing.
    #[error("Role '{0}' not found")]
    RoleNotFound(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// A user together with the role granting their access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAccess {
    /// The user.
    pub user: User,
    /// The user's role.
    pub role: Role,
}

impl ResolvedAccess {
    /// Returns true if the role grants `permission`.
    #[must_use]
    pub fn grants(&self, permission: &str) -> bool {
        self.role.grants(permission)
    }
}

/// Looks up user → role → access.
#[derive(Debug, Clone)]
pub struct AccessRepository {
    db: DatabaseConnection,
}

impl AccessRepository {
    /// Creates a new access repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Resolves the role of a user.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound`, `NoRole` or `RoleNotFound` when the chain is
    /// broken, or a database error.
    pub async fn resolve(&self, uid: Uuid) -> Result<ResolvedAccess, AccessLookupError> {
        let user: User = users::Entity::find_by_id(uid)
            .one(&self.db)
            .await?
            .ok_or(AccessLookupError::UserNotFound)?
            .into();

        let role_name = user
            .role
            .clone()
            .filter(|role| !role.is_empty())
            .ok_or(AccessLookupError::NoRole)?;

        let role = roles::Entity::find_by_id(role_name.clone())
            .one(&self.db)
            .await?
            .ok_or(AccessLookupError::RoleNotFound(role_name))?;

        Ok(ResolvedAccess {
            user,
            role: role.into(),
        })
    }
}

//! Role repository for database operations.

use chrono::Utc;
use dompet_core::role::{Role, ValidRole};
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set};

use crate::entities::roles::{self, AccessList};

/// Error types for role operations.
#[derive(Debug, thiserror::Error)]
pub enum RoleError {
    /// Role not found.
    #[error("Role '{0}' not found")]
    NotFound(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Role repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct RoleRepository {
    db: DatabaseConnection,
}

impl RoleRepository {
    /// Creates a new role repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all roles ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<Role>, RoleError> {
        let roles = roles::Entity::find()
            .order_by_asc(roles::Column::Name)
            .all(&self.db)
            .await?;

        Ok(roles.into_iter().map(Role::from).collect())
    }

    /// Finds a role by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find(&self, name: &str) -> Result<Option<Role>, RoleError> {
        let role = roles::Entity::find_by_id(name.to_string())
            .one(&self.db)
            .await?;

        Ok(role.map(Role::from))
    }

    /// Creates a role, overwriting any existing role of the same name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub async fn upsert(&self, input: ValidRole) -> Result<Role, RoleError> {
        let existing = roles::Entity::find_by_id(input.name.clone())
            .one(&self.db)
            .await?;

        let role = roles::ActiveModel {
            name: Set(input.name),
            access: Set(AccessList(input.access)),
            created_at: Set(Utc::now()),
        };

        let saved = if existing.is_some() {
            role.update(&self.db).await?
        } else {
            role.insert(&self.db).await?
        };

        Ok(saved.into())
    }

    /// Replaces the access list of a role.
    ///
    /// # Errors
    ///
    /// Returns `RoleError::NotFound` if the role does not exist.
    pub async fn update_access(&self, name: &str, access: Vec<String>) -> Result<Role, RoleError> {
        let role = roles::Entity::find_by_id(name.to_string())
            .one(&self.db)
            .await?
            .ok_or_else(|| RoleError::NotFound(name.to_string()))?;

        let mut active: roles::ActiveModel = role.into();
        active.access = Set(AccessList(access));

        Ok(active.update(&self.db).await?.into())
    }

    /// Deletes a role. Users keep their role reference.
    ///
    /// # Errors
    ///
    /// Returns `RoleError::NotFound` if the role does not exist.
    pub async fn delete(&self, name: &str) -> Result<(), RoleError> {
        let result = roles::Entity::delete_by_id(name.to_string())
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(RoleError::NotFound(name.to_string()));
        }
        Ok(())
    }
}

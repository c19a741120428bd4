//! User repository for database operations.

use chrono::Utc;
use dompet_core::user::{NewUser, User, UserChanges};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{roles, users};

/// Error types for user operations.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    /// User not found.
    #[error("User not found: {0}")]
    NotFound(Uuid),

    /// Email belongs to another user.
    #[error("Email is already registered")]
    EmailTaken,

    /// Referenced role does not exist.
    #[error("Role '{0}' is not registered")]
    UnknownRole(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user row by email, including the password hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, uid: Uuid) -> Result<Option<User>, DbErr> {
        let user = users::Entity::find_by_id(uid).one(&self.db).await?;
        Ok(user.map(User::from))
    }

    /// Lists all users, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<User>, DbErr> {
        let users = users::Entity::find()
            .order_by_asc(users::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(users.into_iter().map(User::from).collect())
    }

    /// Checks if an email is already registered, optionally ignoring one user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn email_exists(&self, email: &str, except: Option<Uuid>) -> Result<bool, DbErr> {
        let mut query = users::Entity::find().filter(users::Column::Email.eq(email));
        if let Some(uid) = except {
            query = query.filter(users::Column::Uid.ne(uid));
        }

        Ok(query.count(&self.db).await? > 0)
    }

    async fn ensure_role(&self, role: &str) -> Result<(), UserError> {
        let exists = roles::Entity::find_by_id(role.to_string())
            .one(&self.db)
            .await?
            .is_some();

        if exists {
            Ok(())
        } else {
            Err(UserError::UnknownRole(role.to_string()))
        }
    }

    /// Creates a user with an already hashed password.
    ///
    /// # Errors
    ///
    /// Returns `UserError::UnknownRole` if the role does not exist and
    /// `UserError::EmailTaken` if the email is registered.
    pub async fn create(&self, input: NewUser, password_hash: &str) -> Result<User, UserError> {
        self.ensure_role(&input.role).await?;
        if self.email_exists(&input.email, None).await? {
            return Err(UserError::EmailTaken);
        }

        let now = Utc::now();
        let user = users::ActiveModel {
            uid: Set(Uuid::new_v4()),
            email: Set(input.email),
            display_name: Set(input.display_name),
            role: Set(Some(input.role)),
            password_hash: Set(password_hash.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(user.insert(&self.db).await?.into())
    }

    /// Applies the present fields of `changes`.
    ///
    /// `password_hash` is the hash of `changes.new_password`, if any.
    ///
    /// # Errors
    ///
    /// Returns `UserError::NotFound`, `UnknownRole`, or `EmailTaken`.
    pub async fn update(
        &self,
        uid: Uuid,
        changes: UserChanges,
        password_hash: Option<String>,
    ) -> Result<User, UserError> {
        let user = users::Entity::find_by_id(uid)
            .one(&self.db)
            .await?
            .ok_or(UserError::NotFound(uid))?;

        if let Some(role) = &changes.role {
            self.ensure_role(role).await?;
        }
        if let Some(email) = &changes.email {
            if self.email_exists(email, Some(uid)).await? {
                return Err(UserError::EmailTaken);
            }
        }

        let mut active: users::ActiveModel = user.into();
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(display_name) = changes.display_name {
            active.display_name = Set(Some(display_name));
        }
        if let Some(role) = changes.role {
            active.role = Set(Some(role));
        }
        if let Some(hash) = password_hash {
            active.password_hash = Set(hash);
        }
        active.updated_at = Set(Utc::now());

        Ok(active.update(&self.db).await?.into())
    }

    /// Deletes a user.
    ///
    /// # Errors
    ///
    /// Returns `UserError::NotFound` if the user does not exist.
    pub async fn delete(&self, uid: Uuid) -> Result<(), UserError> {
        let result = users::Entity::delete_by_id(uid).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(UserError::NotFound(uid));
        }
        Ok(())
    }
}

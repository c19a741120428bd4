//! Category repository for database operations.

use std::collections::HashMap;

use chrono::Utc;
use dompet_core::category::{Category, ValidCategory};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::categories;

/// Error types for category operations.
#[derive(Debug, thiserror::Error)]
pub enum CategoryError {
    /// Category not found.
    #[error("Category not found: {0}")]
    NotFound(Uuid),

    /// Category still has sub-categories.
    #[error("Category still has sub-categories and cannot be deleted")]
    HasChildren,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Category repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all categories, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<Category>, CategoryError> {
        let rows = categories::Entity::find()
            .order_by_desc(categories::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    /// Category names keyed by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn names(&self) -> Result<HashMap<Uuid, String>, CategoryError> {
        let rows = categories::Entity::find().all(&self.db).await?;
        Ok(rows.into_iter().map(|c| (c.id, c.name)).collect())
    }

    /// Finds a category by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find(&self, id: Uuid) -> Result<Option<Category>, CategoryError> {
        let row = categories::Entity::find_by_id(id).one(&self.db).await?;
        Ok(row.map(Category::from))
    }

    /// Creates a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: ValidCategory) -> Result<Category, CategoryError> {
        let now = Utc::now();
        let category = categories::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            category_type: Set(input.category_type.into()),
            parent_id: Set(input.parent_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(category.insert(&self.db).await?.into())
    }

    /// Replaces name, type and parent of a category.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::NotFound` if the category does not exist.
    pub async fn update(&self, id: Uuid, input: ValidCategory) -> Result<Category, CategoryError> {
        let category = categories::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(CategoryError::NotFound(id))?;

        let mut active: categories::ActiveModel = category.into();
        active.name = Set(input.name);
        active.category_type = Set(input.category_type.into());
        active.parent_id = Set(input.parent_id);
        active.updated_at = Set(Utc::now());

        Ok(active.update(&self.db).await?.into())
    }

    /// Deletes a category that has no direct children.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::HasChildren` if any category names it as parent,
    /// or `CategoryError::NotFound`.
    pub async fn delete(&self, id: Uuid) -> Result<(), CategoryError> {
        let children = categories::Entity::find()
            .filter(categories::Column::ParentId.eq(id))
            .count(&self.db)
            .await?;
        if children > 0 {
            return Err(CategoryError::HasChildren);
        }

        let result = categories::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(CategoryError::NotFound(id));
        }
        Ok(())
    }
}

//! Transaction repository for transaction database operations.
//!
//! Every write runs in one database transaction together with the usage
//! recomputation of the budgets it affects.

use chrono::Utc;
use dompet_core::budget::UsageKey;
use dompet_core::period::MonthKey;
use dompet_core::transaction::{Transaction, TransactionFilter, ValidTransaction};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use super::budget::sync_usage;
use crate::entities::{categories, sea_orm_active_enums::EntryKind, transactions};

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Transaction not found.
    #[error("Transaction not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Transaction repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

/// Category name and parent copied onto a transaction at write time.
struct CategorySnapshot {
    name: Option<String>,
    parent_id: Option<Uuid>,
}

async fn category_snapshot<C>(conn: &C, input: &ValidTransaction) -> Result<CategorySnapshot, DbErr>
where
    C: ConnectionTrait,
{
    let category = categories::Entity::find_by_id(input.category_id)
        .one(conn)
        .await?;

    Ok(CategorySnapshot {
        name: input
            .category_name
            .clone()
            .or_else(|| category.as_ref().map(|c| c.name.clone())),
        parent_id: category.and_then(|c| c.parent_id),
    })
}

fn usage_key(model: &transactions::Model) -> Result<UsageKey, DbErr> {
    let month = model
        .month
        .parse::<MonthKey>()
        .map_err(|e| DbErr::Type(format!("{e}")))?;
    Ok(UsageKey::new(model.category_id, month))
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists transactions, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, filter: TransactionFilter) -> Result<Vec<Transaction>, TransactionError> {
        let mut query = transactions::Entity::find();
        if let Some(month) = filter.month {
            query = query.filter(transactions::Column::Month.eq(month.to_string()));
        }
        if let Some(kind) = filter.transaction_type {
            query = query.filter(transactions::Column::TransactionType.eq(EntryKind::from(kind)));
        }

        let rows = query
            .order_by_desc(transactions::Column::CreatedAt)
            .limit(filter.limit)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(transactions::Model::into_domain)
            .collect::<Result<_, _>>()?)
    }

    /// Lists every transaction, for analytics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_all(&self) -> Result<Vec<Transaction>, TransactionError> {
        let rows = transactions::Entity::find()
            .order_by_asc(transactions::Column::Date)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(transactions::Model::into_domain)
            .collect::<Result<_, _>>()?)
    }

    /// Finds a transaction by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find(&self, id: Uuid) -> Result<Option<Transaction>, TransactionError> {
        let row = transactions::Entity::find_by_id(id).one(&self.db).await?;
        Ok(row.map(transactions::Model::into_domain).transpose()?)
    }

    /// Records a transaction and re-syncs the budget of its category/month.
    ///
    /// # Errors
    ///
    /// Returns an error if the database transaction fails.
    pub async fn create(&self, input: ValidTransaction) -> Result<Transaction, TransactionError> {
        let txn = self.db.begin().await?;

        let snapshot = category_snapshot(&txn, &input).await?;
        let now = Utc::now();
        let saved = transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            amount: Set(input.amount),
            transaction_type: Set(input.transaction_type.into()),
            category_id: Set(input.category_id),
            category_name: Set(snapshot.name),
            parent_category_id: Set(snapshot.parent_id),
            description: Set(input.description),
            date: Set(input.date),
            month: Set(input.month.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        sync_usage(&txn, UsageKey::new(input.category_id, input.month)).await?;

        let transaction = saved.into_domain()?;
        txn.commit().await?;
        Ok(transaction)
    }

    /// Replaces a transaction and re-syncs both the old and the new
    /// category/month budgets.
    ///
    /// # Errors
    ///
    /// Returns `TransactionError::NotFound` if the transaction does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        input: ValidTransaction,
    ) -> Result<Transaction, TransactionError> {
        let txn = self.db.begin().await?;

        let existing = transactions::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(TransactionError::NotFound(id))?;
        let old_key = usage_key(&existing)?;
        let new_key = UsageKey::new(input.category_id, input.month);

        let snapshot = category_snapshot(&txn, &input).await?;
        let mut active: transactions::ActiveModel = existing.into();
        active.amount = Set(input.amount);
        active.transaction_type = Set(input.transaction_type.into());
        active.category_id = Set(input.category_id);
        active.category_name = Set(snapshot.name);
        active.parent_category_id = Set(snapshot.parent_id);
        active.description = Set(input.description);
        active.date = Set(input.date);
        active.month = Set(input.month.to_string());
        active.updated_at = Set(Utc::now());
        let saved = active.update(&txn).await?;

        sync_usage(&txn, new_key).await?;
        if old_key != new_key {
            sync_usage(&txn, old_key).await?;
        }

        let transaction = saved.into_domain()?;
        txn.commit().await?;
        Ok(transaction)
    }

    /// Deletes a transaction and re-syncs the budget it counted towards.
    ///
    /// # Errors
    ///
    /// Returns `TransactionError::NotFound` if the transaction does not exist.
    pub async fn delete(&self, id: Uuid) -> Result<(), TransactionError> {
        let txn = self.db.begin().await?;

        let existing = transactions::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(TransactionError::NotFound(id))?;
        let key = usage_key(&existing)?;

        transactions::Entity::delete_by_id(id).exec(&txn).await?;
        sync_usage(&txn, key).await?;

        txn.commit().await?;
        Ok(())
    }
}

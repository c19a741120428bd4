//! Budget repository for budget database operations.
//!
//! Besides CRUD this owns the two budget lifecycles: copy-forward into the
//! next month on create, and usage recomputation from the transactions of a
//! (category, month) pair.

use std::collections::HashSet;

use chrono::Utc;
use dompet_core::budget::{
    Budget, BudgetError as BudgetRuleError, BudgetService, BudgetUsage, UsageKey, ValidBudget,
};
use dompet_core::period::MonthKey;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::entities::{budgets, sea_orm_active_enums::EntryKind, transactions};

/// Error types for budget operations.
#[derive(Debug, thiserror::Error)]
pub enum BudgetError {
    /// Budget not found.
    #[error("Budget not found: {0}")]
    NotFound(Uuid),

    /// Budget rule violation.
    #[error(transparent)]
    Invalid(#[from] BudgetRuleError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Result of creating a budget.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBudget {
    /// The budget as requested.
    pub budget: Budget,
    /// The next-month copy, when one was created.
    pub carried_forward: Option<Budget>,
}

/// Budget repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    db: DatabaseConnection,
}

/// Amounts of the expense transactions counted by a budget.
async fn expense_amounts<C>(conn: &C, key: UsageKey) -> Result<Vec<i64>, DbErr>
where
    C: ConnectionTrait,
{
    transactions::Entity::find()
        .select_only()
        .column(transactions::Column::Amount)
        .filter(transactions::Column::CategoryId.eq(key.category_id))
        .filter(transactions::Column::Month.eq(key.month.to_string()))
        .filter(transactions::Column::TransactionType.eq(EntryKind::Expense))
        .into_tuple::<i64>()
        .all(conn)
        .await
}

async fn compute_usage<C>(conn: &C, key: UsageKey, limit: i64) -> Result<BudgetUsage, DbErr>
where
    C: ConnectionTrait,
{
    let amounts = expense_amounts(conn, key).await?;
    Ok(BudgetService::compute_usage(limit, amounts))
}

/// Recomputes `used`, `remaining` and `status` of every budget tracking `key`.
///
/// Returns the number of budgets written; zero when none matches.
pub(crate) async fn sync_usage<C>(conn: &C, key: UsageKey) -> Result<usize, DbErr>
where
    C: ConnectionTrait,
{
    let matching = budgets::Entity::find()
        .filter(budgets::Column::CategoryId.eq(key.category_id))
        .filter(budgets::Column::Month.eq(key.month.to_string()))
        .all(conn)
        .await?;

    if matching.is_empty() {
        debug!(
            category_id = %key.category_id,
            month = %key.month,
            "no budget for category/month, skipping usage sync"
        );
        return Ok(0);
    }

    let amounts = expense_amounts(conn, key).await?;
    let count = matching.len();
    let now = Utc::now();

    for budget in matching {
        let usage = BudgetService::compute_usage(budget.limit, amounts.iter().copied());
        let mut active: budgets::ActiveModel = budget.into();
        active.used = Set(usage.used);
        active.remaining = Set(usage.remaining);
        active.status = Set(usage.status.into());
        active.updated_at = Set(now);
        active.update(conn).await?;
    }

    debug!(
        category_id = %key.category_id,
        month = %key.month,
        budgets = count,
        "budget usage synced"
    );
    Ok(count)
}

async fn budget_exists<C>(conn: &C, category_id: Uuid, month: MonthKey) -> Result<bool, DbErr>
where
    C: ConnectionTrait,
{
    let count = budgets::Entity::find()
        .filter(budgets::Column::CategoryId.eq(category_id))
        .filter(budgets::Column::Month.eq(month.to_string()))
        .count(conn)
        .await?;

    Ok(count > 0)
}

async fn insert_with_usage<C>(
    conn: &C,
    input: &ValidBudget,
    parent_id: Option<Uuid>,
) -> Result<budgets::Model, DbErr>
where
    C: ConnectionTrait,
{
    let usage = compute_usage(conn, UsageKey::new(input.category_id, input.month), input.limit).await?;
    let now = Utc::now();

    budgets::ActiveModel {
        id: Set(Uuid::new_v4()),
        category_id: Set(input.category_id),
        category_name: Set(input.category_name.clone()),
        limit: Set(input.limit),
        month: Set(input.month.to_string()),
        used: Set(usage.used),
        remaining: Set(usage.remaining),
        status: Set(usage.status.into()),
        continue_next_month: Set(input.continue_next_month),
        parent_id: Set(parent_id),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
}

impl BudgetRepository {
    /// Creates a new budget repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists budgets, latest month first, optionally for a single month.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, month: Option<MonthKey>) -> Result<Vec<Budget>, BudgetError> {
        let mut query = budgets::Entity::find();
        if let Some(month) = month {
            query = query.filter(budgets::Column::Month.eq(month.to_string()));
        }

        let rows = query
            .order_by_desc(budgets::Column::Month)
            .order_by_desc(budgets::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(budgets::Model::into_domain)
            .collect::<Result<_, _>>()?)
    }

    /// Finds a budget by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find(&self, id: Uuid) -> Result<Option<Budget>, BudgetError> {
        let row = budgets::Entity::find_by_id(id).one(&self.db).await?;
        Ok(row.map(budgets::Model::into_domain).transpose()?)
    }

    /// Creates a budget with its usage computed from existing transactions.
    ///
    /// With `continue_next_month` set, also creates a copy for the following
    /// month unless that category already has a budget there.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::Invalid` when there is no following month, or an
    /// error if the database transaction fails.
    pub async fn create(&self, input: ValidBudget) -> Result<CreatedBudget, BudgetError> {
        let txn = self.db.begin().await?;

        let budget = insert_with_usage(&txn, &input, None).await?;

        let carried_forward = if input.continue_next_month {
            let next = input.next_month_copy()?;
            if budget_exists(&txn, next.category_id, next.month).await? {
                debug!(
                    category_id = %next.category_id,
                    month = %next.month,
                    "next-month budget already exists, not copying"
                );
                None
            } else {
                Some(insert_with_usage(&txn, &next, Some(budget.id)).await?)
            }
        } else {
            None
        };

        let created = CreatedBudget {
            budget: budget.into_domain()?,
            carried_forward: carried_forward.map(budgets::Model::into_domain).transpose()?,
        };
        txn.commit().await?;
        Ok(created)
    }

    /// Replaces the editable fields of a budget and recomputes its usage.
    ///
    /// Copies made from this budget are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NotFound` if the budget does not exist.
    pub async fn update(&self, id: Uuid, input: ValidBudget) -> Result<Budget, BudgetError> {
        let txn = self.db.begin().await?;

        let budget = budgets::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(BudgetError::NotFound(id))?;

        let usage = compute_usage(&txn, UsageKey::new(input.category_id, input.month), input.limit)
            .await?;

        let mut active: budgets::ActiveModel = budget.into();
        active.category_id = Set(input.category_id);
        active.category_name = Set(input.category_name);
        active.limit = Set(input.limit);
        active.month = Set(input.month.to_string());
        active.continue_next_month = Set(input.continue_next_month);
        active.used = Set(usage.used);
        active.remaining = Set(usage.remaining);
        active.status = Set(usage.status.into());
        active.updated_at = Set(Utc::now());
        let updated = active.update(&txn).await?.into_domain()?;

        txn.commit().await?;
        Ok(updated)
    }

    /// Deletes a budget. Deleting an original also deletes its copies.
    ///
    /// Returns the number of budgets removed.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NotFound` if the budget does not exist.
    pub async fn delete(&self, id: Uuid) -> Result<u64, BudgetError> {
        let txn = self.db.begin().await?;

        let budget = budgets::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(BudgetError::NotFound(id))?;

        let mut removed = 0;
        if budget.parent_id.is_none() {
            removed += budgets::Entity::delete_many()
                .filter(budgets::Column::ParentId.eq(id))
                .exec(&txn)
                .await?
                .rows_affected;
        }
        removed += budgets::Entity::delete_by_id(id)
            .exec(&txn)
            .await?
            .rows_affected;

        txn.commit().await?;
        Ok(removed)
    }

    /// Copies every budget of `from` into `to` with freshly computed usage.
    ///
    /// Categories that already have a budget in `to` are skipped. Copies are
    /// independent budgets without a parent.
    ///
    /// # Errors
    ///
    /// Returns an error if the database transaction fails.
    pub async fn copy_month(&self, from: MonthKey, to: MonthKey) -> Result<Vec<Budget>, BudgetError> {
        let txn = self.db.begin().await?;

        let sources = budgets::Entity::find()
            .filter(budgets::Column::Month.eq(from.to_string()))
            .order_by_asc(budgets::Column::CreatedAt)
            .all(&txn)
            .await?;

        let mut taken: HashSet<Uuid> = budgets::Entity::find()
            .select_only()
            .column(budgets::Column::CategoryId)
            .filter(budgets::Column::Month.eq(to.to_string()))
            .into_tuple::<Uuid>()
            .all(&txn)
            .await?
            .into_iter()
            .collect();

        let mut created = Vec::new();
        for source in sources {
            if !taken.insert(source.category_id) {
                continue;
            }
            let input = ValidBudget {
                category_id: source.category_id,
                category_name: source.category_name,
                limit: source.limit,
                month: to,
                continue_next_month: source.continue_next_month,
            };
            created.push(insert_with_usage(&txn, &input, None).await?);
        }

        let copied = created
            .into_iter()
            .map(budgets::Model::into_domain)
            .collect::<Result<_, _>>()?;
        txn.commit().await?;
        Ok(copied)
    }
}

//! `SeaORM` Entity for budgets table.

use dompet_core::budget::Budget;
use dompet_core::period::MonthKey;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::BudgetState;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub category_id: Uuid,
    pub category_name: String,
    #[sea_orm(column_name = "budget_limit")]
    pub limit: i64,
    #[sea_orm(column_type = "String(StringLen::N(7))")]
    pub month: String,
    pub used: i64,
    pub remaining: i64,
    pub status: BudgetState,
    pub continue_next_month: bool,
    pub parent_id: Option<Uuid>,
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Converts the row into the domain type.
    ///
    /// # Errors
    ///
    /// Returns `DbErr::Type` if the stored month key is malformed.
    pub fn into_domain(self) -> Result<Budget, DbErr> {
        Ok(Budget {
            id: self.id,
            category_id: self.category_id,
            category_name: self.category_name,
            limit: self.limit,
            month: self.month.parse::<MonthKey>().map_err(|e| DbErr::Type(format!("{e}")))?,
            used: self.used,
            remaining: self.remaining,
            status: self.status.into(),
            continue_next_month: self.continue_next_month,
            parent_id: self.parent_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

//! `SeaORM` Entity for transactions table.

use dompet_core::period::MonthKey;
use dompet_core::transaction::Transaction;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::EntryKind;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub amount: i64,
    pub transaction_type: EntryKind,
    pub category_id: Uuid,
    pub category_name: Option<String>,
    pub parent_category_id: Option<Uuid>,
    pub description: String,
    pub date: ChronoDateTimeUtc,
    /// `YYYY-MM`, UTC month of `date`.
    #[sea_orm(column_type = "String(StringLen::N(7))")]
    pub month: String,
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
    pub fn into_domain(self) -> Result<Transaction, DbErr> {
        Ok(Transaction {
            id: self.id,
            amount: self.amount,
            transaction_type: self.transaction_type.into(),
            category_id: self.category_id,
            category_name: self.category_name,
            parent_category_id: self.parent_category_id,
            description: self.description,
            date: self.date,
            month: self.month.parse::<MonthKey>().map_err(|e| DbErr::Type(format!("{e}")))?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

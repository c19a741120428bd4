//! String-backed enums shared by several tables.

use dompet_core::budget::BudgetStatus;
use dompet_core::category::CategoryType;
use dompet_core::transaction::TransactionType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Direction of money, used by categories and transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum EntryKind {
    /// Money coming in.
    #[sea_orm(string_value = "income")]
    Income,
    /// Money going out.
    #[sea_orm(string_value = "expense")]
    Expense,
}

/// Budget usage status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum BudgetState {
    /// Comfortably under the limit.
    #[sea_orm(string_value = "safe")]
    Safe,
    /// Close to the limit.
    #[sea_orm(string_value = "warning")]
    Warning,
    /// At or over the limit.
    #[sea_orm(string_value = "over")]
    Over,
}

impl From<CategoryType> for EntryKind {
    fn from(value: CategoryType) -> Self {
        match value {
            CategoryType::Income => Self::Income,
            CategoryType::Expense => Self::Expense,
        }
    }
}

impl From<EntryKind> for CategoryType {
    fn from(value: EntryKind) -> Self {
        match value {
            EntryKind::Income => Self::Income,
            EntryKind::Expense => Self::Expense,
        }
    }
}

impl From<TransactionType> for EntryKind {
    fn from(value: TransactionType) -> Self {
        match value {
            TransactionType::Income => Self::Income,
            TransactionType::Expense => Self::Expense,
        }
    }
}

impl From<EntryKind> for TransactionType {
    fn from(value: EntryKind) -> Self {
        match value {
            EntryKind::Income => Self::Income,
            EntryKind::Expense => Self::Expense,
        }
    }
}

impl From<BudgetStatus> for BudgetState {
    fn from(value: BudgetStatus) -> Self {
        match value {
            BudgetStatus::Safe => Self::Safe,
            BudgetStatus::Warning => Self::Warning,
            BudgetStatus::Over => Self::Over,
        }
    }
}

impl From<BudgetState> for BudgetStatus {
    fn from(value: BudgetState) -> Self {
        match value {
            BudgetState::Safe => Self::Safe,
            BudgetState::Warning => Self::Warning,
            BudgetState::Over => Self::Over,
        }
    }
}

//! Shared setup for repository integration tests.

#![allow(dead_code)]

use dompet_core::budget::ValidBudget;
use dompet_core::category::{CategoryType, ValidCategory};
use dompet_core::transaction::{TransactionInput, ValidTransaction};
use sea_orm::{Database, DatabaseConnection};
use uuid::Uuid;

/// Creates an in-memory SQLite database with all migrations applied.
pub async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    dompet_db::migrate(&db)
        .await
        .expect("Failed to run migrations");
    db
}

pub fn category(name: &str, parent_id: Option<Uuid>) -> ValidCategory {
    ValidCategory {
        name: name.to_string(),
        category_type: CategoryType::Expense,
        parent_id,
    }
}

pub fn budget(category_id: Uuid, name: &str, limit: i64, month: &str, carry: bool) -> ValidBudget {
    ValidBudget {
        category_id,
        category_name: name.to_string(),
        limit,
        month: month.parse().expect("valid month"),
        continue_next_month: carry,
    }
}

pub fn expense(category_id: Uuid, amount: i64, date: &str) -> ValidTransaction {
    transaction("expense", category_id, amount, date)
}

pub fn transaction(kind: &str, category_id: Uuid, amount: i64, date: &str) -> ValidTransaction {
    TransactionInput {
        amount: Some(amount),
        transaction_type: Some(kind.to_string()),
        category_id: Some(category_id),
        category_name: None,
        description: Some("test".to_string()),
        date: Some(date.to_string()),
    }
    .validate()
    .expect("valid transaction")
}

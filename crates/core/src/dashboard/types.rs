//! Dashboard data types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::period::{MonthKey, PeriodFilter};

/// Full dashboard response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// Filter the period-based figures were computed for.
    pub period: PeriodFilter,
    /// Year of the yearly series.
    pub year: i32,
    /// Totals.
    pub summary: Summary,
    /// Expense totals per category, largest first.
    pub category_breakdown: Vec<CategoryTotal>,
    /// Running balance over the period.
    pub cashflow: Vec<CashflowPoint>,
    /// Twelve monthly buckets of the requested year.
    pub yearly: Vec<MonthBucket>,
    /// Largest expenses of the period.
    pub top_expenses: Vec<TopExpense>,
    /// Expense totals per day of the period.
    pub daily_expense: Vec<DailyTotal>,
    /// Budgets of the current month, highest usage first.
    pub budget_progress: Vec<BudgetProgress>,
}

/// Income and expense totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Income within the period.
    pub income: i64,
    /// Expense within the period.
    pub expense: i64,
    /// All-time income minus all-time expense.
    pub balance: i64,
}

/// Expense total of one category group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    /// Parent category name, category name, or `Other`.
    pub name: String,
    /// Summed expense.
    pub total: i64,
}

/// One point of the running balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashflowPoint {
    /// Transaction date.
    pub date: DateTime<Utc>,
    /// Balance after this transaction.
    pub balance: i64,
}

/// Income and expense of one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthBucket {
    /// Month.
    pub month: MonthKey,
    /// Income.
    pub income: i64,
    /// Expense.
    pub expense: i64,
}

/// A large expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopExpense {
    /// Transaction ID.
    pub id: Uuid,
    /// Category name.
    pub category_name: Option<String>,
    /// Description.
    pub description: String,
    /// Amount.
    pub amount: i64,
    /// Transaction date.
    pub date: DateTime<Utc>,
}

/// Expense total of one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTotal {
    /// UTC calendar day.
    pub date: NaiveDate,
    /// Summed expense.
    pub total: i64,
}

/// Usage of one budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetProgress {
    /// Budget ID.
    pub budget_id: Uuid,
    /// Category name.
    pub category_name: String,
    /// Amount spent.
    pub used: i64,
    /// Spending cap.
    pub limit: i64,
    /// `round(used / limit * 100)`, capped at 999.
    pub percent: u32,
}

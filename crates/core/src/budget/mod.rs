//! Monthly per-category budgets and usage tracking.

pub mod error;
pub mod service;
pub mod types;


pub use error::BudgetError;
pub use service::{BudgetService, WARNING_RATIO};
pub use types::{
    Budget, BudgetInput, BudgetStatus, BudgetUsage, CopyBudgetsInput, UsageKey, ValidBudget,
};

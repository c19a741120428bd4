//! Dashboard analytics.
//!
//! This module provides read-only aggregates over transactions and budgets:
//! - Period summary and all-time balance
//! - Expense breakdown by (parent) category
//! - Running cashflow, yearly and daily series
//! - Largest expenses and current budget progress

pub mod service;
pub mod types;

pub use service::DashboardService;
pub use types::*;

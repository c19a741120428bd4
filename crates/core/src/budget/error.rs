//! Budget error types.

use thiserror::Error;

use crate::period::{MonthKey, PeriodError};

/// Budget validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BudgetError {
    /// A required field is absent or blank.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Limit must be strictly positive.
    #[error("Budget limit must be greater than zero")]
    NonPositiveLimit,

    /// Bulk copy onto the same month.
    #[error("Source and target month must differ")]
    SameMonth,

    /// Carry-forward past the last representable month.
    #[error("Budget for {0} cannot continue into the next month")]
    NoNextMonth(MonthKey),

    /// Bad month key.
    #[error(transparent)]
    Period(#[from] PeriodError),
}

//! Transaction error types.

use thiserror::Error;

use crate::period::PeriodError;

/// Transaction validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    /// A required field is absent.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Amount must be strictly positive.
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,

    /// Type is neither `income` nor `expense`.
    #[error("Invalid transaction type '{0}', expected income or expense")]
    InvalidType(String),

    /// Bad date or month.
    #[error(transparent)]
    Period(#[from] PeriodError),
}

//! Income / expense transaction records.

pub mod error;
pub mod types;

pub use error::TransactionError;
pub use types::{
    DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT, Transaction, TransactionFilter, TransactionInput,
    TransactionType, ValidTransaction,
};

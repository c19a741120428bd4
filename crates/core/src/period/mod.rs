//! Month keys, transaction dates and dashboard period filters.
//!
//! Every month key is derived from a UTC instant, for writes and reads alike.

mod filter;
mod month;

pub use filter::PeriodFilter;
pub use month::{MonthKey, PeriodError, parse_transaction_date};

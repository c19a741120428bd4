//! Transaction data types and input validation.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::TransactionError;
use crate::period::{MonthKey, parse_transaction_date};

/// Default page size for transaction listings.
pub const DEFAULT_LIST_LIMIT: u64 = 100;

/// Largest accepted page size.
pub const MAX_LIST_LIMIT: u64 = 1000;

/// Direction of a money movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in.
    Income,
    /// Money going out. Only these count against budgets.
    Expense,
}

impl TransactionType {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl FromStr for TransactionType {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(TransactionError::InvalidType(other.to_string())),
        }
    }
}

/// A stored transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Transaction ID.
    pub id: Uuid,
    /// Amount in minor units, always positive.
    pub amount: i64,
    /// Income or expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Category the transaction is attributed to.
    pub category_id: Uuid,
    /// Category name copied at write time.
    pub category_name: Option<String>,
    /// Parent of the category, copied at write time.
    pub parent_category_id: Option<Uuid>,
    /// Free-text note.
    pub description: String,
    /// When the money moved.
    pub date: DateTime<Utc>,
    /// UTC month of `date`.
    pub month: MonthKey,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Returns true if this transaction counts against a budget.
    #[must_use]
    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }
}

/// Raw create / update payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInput {
    /// Amount in minor units.
    pub amount: Option<i64>,
    /// `income` or `expense`.
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    /// Category ID.
    pub category_id: Option<Uuid>,
    /// Category name; filled from the category record when absent.
    pub category_name: Option<String>,
    /// Free-text note.
    pub description: Option<String>,
    /// RFC 3339 timestamp or `YYYY-MM-DD`.
    pub date: Option<String>,
}

/// A transaction payload that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidTransaction {
    /// Amount in minor units.
    pub amount: i64,
    /// Income or expense.
    pub transaction_type: TransactionType,
    /// Category ID.
    pub category_id: Uuid,
    /// Category name as supplied, if any.
    pub category_name: Option<String>,
    /// Free-text note, empty when absent.
    pub description: String,
    /// Parsed date.
    pub date: DateTime<Utc>,
    /// UTC month of `date`.
    pub month: MonthKey,
}

impl TransactionInput {
    /// Validates the payload and derives the month key.
    ///
    /// # Errors
    ///
    /// Returns `TransactionError::MissingField` for absent required fields,
    /// `NonPositiveAmount`, `InvalidType`, or a date parsing error.
    pub fn validate(self) -> Result<ValidTransaction, TransactionError> {
        let amount = self
            .amount
            .ok_or(TransactionError::MissingField("amount"))?;
        let raw_type = self
            .transaction_type
            .ok_or(TransactionError::MissingField("type"))?;
        let category_id = self
            .category_id
            .ok_or(TransactionError::MissingField("categoryId"))?;
        let raw_date = self
            .date
            .filter(|d| !d.trim().is_empty())
            .ok_or(TransactionError::MissingField("date"))?;

        if amount <= 0 {
            return Err(TransactionError::NonPositiveAmount);
        }
        let transaction_type = raw_type.parse()?;
        let date = parse_transaction_date(&raw_date)?;

        Ok(ValidTransaction {
            amount,
            transaction_type,
            category_id,
            category_name: self
                .category_name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
            description: self.description.unwrap_or_default(),
            date,
            month: MonthKey::from_datetime(date),
        })
    }
}

/// Listing filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Only this month.
    pub month: Option<MonthKey>,
    /// Only this type.
    pub transaction_type: Option<TransactionType>,
    /// Page size.
    pub limit: u64,
}

impl Default for TransactionFilter {
    fn default() -> Self {
        Self {
            month: None,
            transaction_type: None,
            limit: DEFAULT_LIST_LIMIT,
        }
    }
}

impl TransactionFilter {
    /// Builds a filter from raw query parameters.
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed month or an unknown type.
    pub fn from_query(
        month: Option<&str>,
        transaction_type: Option<&str>,
        limit: Option<u64>,
    ) -> Result<Self, TransactionError> {
        Ok(Self {
            month: month.map(str::parse::<MonthKey>).transpose()?,
            transaction_type: transaction_type
                .map(str::parse::<TransactionType>)
                .transpose()?,
            limit: limit.map_or(DEFAULT_LIST_LIMIT, |l| l.clamp(1, MAX_LIST_LIMIT)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::PeriodError;
    use rstest::rstest;

    fn food_expense() -> TransactionInput {
        TransactionInput {
            amount: Some(900_000),
            transaction_type: Some("expense".to_string()),
            category_id: Some(Uuid::new_v4()),
            category_name: Some("Food".to_string()),
            description: None,
            date: Some("2025-06-10".to_string()),
        }
    }

    #[test]
    fn test_valid_expense_derives_month() {
        let valid = food_expense().validate().unwrap();

        assert_eq!(valid.amount, 900_000);
        assert_eq!(valid.transaction_type, TransactionType::Expense);
        assert_eq!(valid.month.to_string(), "2025-06");
        assert_eq!(valid.description, "");
    }

    #[rstest]
    #[case(0)]
    #[case(-5)]
    fn test_non_positive_amount(#[case] amount: i64) {
        let input = TransactionInput {
            amount: Some(amount),
            ..food_expense()
        };
        assert_eq!(input.validate(), Err(TransactionError::NonPositiveAmount));
    }

    #[test]
    fn test_unknown_type() {
        let input = TransactionInput {
            transaction_type: Some("transfer".to_string()),
            ..food_expense()
        };
        assert!(matches!(
            input.validate(),
            Err(TransactionError::InvalidType(t)) if t == "transfer"
        ));
    }

    #[test]
    fn test_missing_fields() {
        let input = TransactionInput {
            category_id: None,
            ..food_expense()
        };
        assert_eq!(
            input.validate(),
            Err(TransactionError::MissingField("categoryId"))
        );

        let input = TransactionInput {
            date: Some("  ".to_string()),
            ..food_expense()
        };
        assert_eq!(input.validate(), Err(TransactionError::MissingField("date")));
    }

    #[rstest]
    #[case("June 10")]
    #[case("+12345-06-10")]
    fn test_bad_date(#[case] date: &str) {
        let input = TransactionInput {
            date: Some(date.to_string()),
            ..food_expense()
        };
        assert!(matches!(
            input.validate(),
            Err(TransactionError::Period(PeriodError::InvalidDate(_)))
        ));
    }

    #[test]
    fn test_filter_limit_is_clamped() {
        let filter = TransactionFilter::from_query(None, None, Some(50_000)).unwrap();
        assert_eq!(filter.limit, MAX_LIST_LIMIT);

        let filter = TransactionFilter::from_query(Some("2025-06"), Some("income"), None).unwrap();
        assert_eq!(filter.limit, DEFAULT_LIST_LIMIT);
        assert_eq!(filter.transaction_type, Some(TransactionType::Income));

        assert!(TransactionFilter::from_query(Some("2025-6"), None, None).is_err());
    }
}

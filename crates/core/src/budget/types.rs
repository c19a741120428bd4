//! Budget data types.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::BudgetError;
use crate::period::MonthKey;

/// How close a budget is to its limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    /// More than 20% of the limit remains.
    #[default]
    Safe,
    /// At most 20% of the limit remains.
    Warning,
    /// Nothing remains.
    Over,
}

impl BudgetStatus {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Warning => "warning",
            Self::Over => "over",
        }
    }
}

impl FromStr for BudgetStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "safe" => Ok(Self::Safe),
            "warning" => Ok(Self::Warning),
            "over" => Ok(Self::Over),
            other => Err(format!("unknown budget status '{other}'")),
        }
    }
}

/// A stored budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    /// Budget ID.
    pub id: Uuid,
    /// Budgeted category.
    pub category_id: Uuid,
    /// Category name copied at write time.
    pub category_name: String,
    /// Spending cap in minor units.
    pub limit: i64,
    /// Budgeted month.
    pub month: MonthKey,
    /// Sum of expense transactions of the category in `month`.
    pub used: i64,
    /// `limit - used`, negative when overspent.
    pub remaining: i64,
    /// Classification of `remaining`.
    pub status: BudgetStatus,
    /// Roll a copy into the following month on create.
    pub continue_next_month: bool,
    /// Original budget this one was copied from.
    pub parent_id: Option<Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Identifies the transactions counted by a budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UsageKey {
    /// Category ID.
    pub category_id: Uuid,
    /// Month.
    pub month: MonthKey,
}

impl UsageKey {
    /// Creates a usage key.
    #[must_use]
    pub const fn new(category_id: Uuid, month: MonthKey) -> Self {
        Self { category_id, month }
    }
}

/// Computed usage of a budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetUsage {
    /// Amount spent.
    pub used: i64,
    /// `limit - used`.
    pub remaining: i64,
    /// Status derived from `remaining`.
    pub status: BudgetStatus,
}

/// Raw create / update payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetInput {
    /// Budgeted category.
    pub category_id: Option<Uuid>,
    /// Category display name.
    pub category_name: Option<String>,
    /// Spending cap.
    pub limit: Option<i64>,
    /// `YYYY-MM`.
    pub month: Option<String>,
    /// Roll forward into the next month.
    #[serde(default)]
    pub continue_next_month: bool,
}

/// A budget payload that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidBudget {
    /// Budgeted category.
    pub category_id: Uuid,
    /// Trimmed category name.
    pub category_name: String,
    /// Spending cap.
    pub limit: i64,
    /// Budgeted month.
    pub month: MonthKey,
    /// Roll forward into the next month.
    pub continue_next_month: bool,
}

impl ValidBudget {
    /// The copy of this budget for the following month.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NoNextMonth` for the last representable month.
    pub fn next_month_copy(&self) -> Result<Self, BudgetError> {
        let month = self
            .month
            .next()
            .map_err(|_| BudgetError::NoNextMonth(self.month))?;
        Ok(Self {
            month,
            ..self.clone()
        })
    }
}

impl BudgetInput {
    /// Validates the payload.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::MissingField`, `NonPositiveLimit`, a month
    /// parsing error, or `NoNextMonth` when a carry-forward has nowhere to go.
    pub fn validate(self) -> Result<ValidBudget, BudgetError> {
        let category_id = self
            .category_id
            .ok_or(BudgetError::MissingField("categoryId"))?;
        let category_name = self
            .category_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .ok_or(BudgetError::MissingField("categoryName"))?;
        let limit = self.limit.ok_or(BudgetError::MissingField("limit"))?;
        let month = self.month.ok_or(BudgetError::MissingField("month"))?;

        if limit <= 0 {
            return Err(BudgetError::NonPositiveLimit);
        }

        let valid = ValidBudget {
            category_id,
            category_name,
            limit,
            month: month.parse()?,
            continue_next_month: self.continue_next_month,
        };
        if valid.continue_next_month {
            valid.next_month_copy()?;
        }
        Ok(valid)
    }
}

/// Bulk copy payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyBudgetsInput {
    /// Source month.
    pub from_month: String,
    /// Target month.
    pub to_month: String,
}

impl CopyBudgetsInput {
    /// Parses both months.
    ///
    /// # Errors
    ///
    /// Returns a month parsing error, or `BudgetError::SameMonth`.
    pub fn validate(&self) -> Result<(MonthKey, MonthKey), BudgetError> {
        let from: MonthKey = self.from_month.parse()?;
        let to: MonthKey = self.to_month.parse()?;
        if from == to {
            return Err(BudgetError::SameMonth);
        }
        Ok((from, to))
    }
}

//! Category data types and input validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::CategoryError;

/// Whether a category tags money coming in or going out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    /// Money coming in.
    Income,
    /// Money going out.
    #[default]
    Expense,
}

impl CategoryType {
    /// Lenient conversion used for category writes: anything other than
    /// exactly `"income"` becomes `Expense`.
    #[must_use]
    pub fn coerce(raw: &str) -> Self {
        if raw == "income" {
            Self::Income
        } else {
            Self::Expense
        }
    }

    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

/// A stored category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Category ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Income or expense.
    #[serde(rename = "type")]
    pub category_type: CategoryType,
    /// Parent category, `None` for top-level categories.
    pub parent_id: Option<Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Raw create / update payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    /// Display name.
    pub name: Option<String>,
    /// Category type, coerced on write.
    #[serde(rename = "type")]
    pub category_type: Option<String>,
    /// Parent category.
    pub parent_id: Option<Uuid>,
}

/// A category payload that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCategory {
    /// Trimmed name.
    pub name: String,
    /// Coerced type.
    pub category_type: CategoryType,
    /// Parent category.
    pub parent_id: Option<Uuid>,
}

impl CategoryInput {
    /// Validates a create payload.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::NameRequired` for a blank name and
    /// `CategoryError::TypeRequired` when the type is absent or blank.
    pub fn validate_create(self) -> Result<ValidCategory, CategoryError> {
        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(CategoryError::NameRequired)?
            .to_string();
        let category_type = self
            .category_type
            .as_deref()
            .filter(|kind| !kind.trim().is_empty())
            .map(CategoryType::coerce)
            .ok_or(CategoryError::TypeRequired)?;

        Ok(ValidCategory {
            name,
            category_type,
            parent_id: self.parent_id,
        })
    }

    /// Validates an update payload for category `id`.
    ///
    /// # Errors
    ///
    /// Same as [`CategoryInput::validate_create`], plus
    /// `CategoryError::SelfParent` when `parent_id == id`.
    pub fn validate_update(self, id: Uuid) -> Result<ValidCategory, CategoryError> {
        let valid = self.validate_create()?;
        if valid.parent_id == Some(id) {
            return Err(CategoryError::SelfParent);
        }
        Ok(valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn input(name: &str, kind: &str, parent_id: Option<Uuid>) -> CategoryInput {
        CategoryInput {
            name: Some(name.to_string()),
            category_type: Some(kind.to_string()),
            parent_id,
        }
    }

    #[rstest]
    #[case("income", CategoryType::Income)]
    #[case("expense", CategoryType::Expense)]
    #[case("Income", CategoryType::Expense)]
    #[case("transfer", CategoryType::Expense)]
    #[case("", CategoryType::Expense)]
    fn test_coerce(#[case] raw: &str, #[case] expected: CategoryType) {
        assert_eq!(CategoryType::coerce(raw), expected);
    }

    #[test]
    fn test_create_trims_name() {
        let valid = input("  Food ", "expense", None).validate_create().unwrap();
        assert_eq!(valid.name, "Food");
        assert_eq!(valid.category_type, CategoryType::Expense);
    }

    #[test]
    fn test_blank_name_rejected() {
        assert_eq!(
            input("   ", "expense", None).validate_create(),
            Err(CategoryError::NameRequired)
        );
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    fn test_missing_type_rejected(#[case] kind: Option<&str>) {
        let payload = CategoryInput {
            name: Some("Food".to_string()),
            category_type: kind.map(ToString::to_string),
            parent_id: None,
        };
        assert_eq!(payload.validate_create(), Err(CategoryError::TypeRequired));
    }

    #[test]
    fn test_self_parent_only_checked_on_update() {
        let id = Uuid::new_v4();
        assert!(input("Food", "expense", Some(id)).validate_create().is_ok());
        assert_eq!(
            input("Food", "expense", Some(id)).validate_update(id),
            Err(CategoryError::SelfParent)
        );
        assert!(
            input("Food", "expense", Some(Uuid::new_v4()))
                .validate_update(id)
                .is_ok()
        );
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::json!({"name": "Gaji", "type": "income", "parentId": null});
        let payload: CategoryInput = serde_json::from_value(json).unwrap();
        assert_eq!(payload.category_type.as_deref(), Some("income"));
    }

    proptest! {
        /// Validation trims the name and only an exact `"income"` is income.
        #[test]
        fn test_create_validation(
            pad in "[ \t]{0,3}",
            name in "[A-Za-z ]{0,8}",
            kind in "[a-zA-Z ]{0,8}",
        ) {
            let payload = CategoryInput {
                name: Some(format!("{pad}{name}{pad}")),
                category_type: Some(kind.clone()),
                parent_id: None,
            };

            match payload.validate_create() {
                Ok(valid) => {
                    prop_assert_eq!(valid.name.as_str(), name.trim());
                    prop_assert!(!valid.name.is_empty());
                    prop_assert_eq!(valid.category_type == CategoryType::Income, kind == "income");
                }
                Err(CategoryError::NameRequired) => prop_assert!(name.trim().is_empty()),
                Err(CategoryError::TypeRequired) => {
                    prop_assert!(!name.trim().is_empty());
                    prop_assert!(kind.trim().is_empty());
                }
                Err(other) => prop_assert!(false, "unexpected error: {other}"),
            }
        }
    }
}

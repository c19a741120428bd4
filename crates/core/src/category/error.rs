//! Category error types.

use thiserror::Error;

/// Category validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryError {
    /// Name is missing or blank.
    #[error("Category name is required")]
    NameRequired,

    /// Type is missing or blank.
    #[error("Category type is required")]
    TypeRequired,

    /// A category cannot be its own parent.
    #[error("A category cannot be its own parent")]
    SelfParent,
}

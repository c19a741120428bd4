//! Two-level expense / income category tree.

pub mod error;
pub mod tree;
pub mod types;

pub use error::CategoryError;
pub use tree::{CategoryNode, CategoryTree, build_tree};
pub use types::{Category, CategoryInput, CategoryType, ValidCategory};

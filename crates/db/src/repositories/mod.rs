//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod access;
pub mod budget;
pub mod category;
pub mod role;
pub mod transaction;
pub mod user;

pub use access::{AccessLookupError, AccessRepository, ResolvedAccess};
pub use budget::{BudgetError, BudgetRepository, CreatedBudget};
pub use category::{CategoryError, CategoryRepository};
pub use role::{RoleError, RoleRepository};
pub use transaction::{TransactionError, TransactionRepository};
pub use user::{UserError, UserRepository};

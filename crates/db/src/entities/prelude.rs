//! Entity re-exports.

pub use super::budgets::Entity as Budgets;
pub use super::categories::Entity as Categories;
pub use super::roles::Entity as Roles;
pub use super::transactions::Entity as Transactions;
pub use super::users::Entity as Users;

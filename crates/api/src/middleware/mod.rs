//! Request middleware: API authentication and the page access guard.

pub mod access;
pub mod auth;

pub use access::page_guard;
pub use auth::{AuthUser, auth_middleware, require_permission};

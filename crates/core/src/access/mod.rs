//! Page route access control.
//!
//! Maps request paths to permission tokens and decides whether a role's
//! access list lets a request through. The guard itself lives in the API
//! crate; this module holds the rules.

mod table;

pub use table::{AccessDecision, AccessDenied, RouteAccessTable, normalize_access};

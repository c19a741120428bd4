//! Ordered path → permission table.

use std::collections::HashSet;

use dompet_shared::RouteAccessEntry;
use thiserror::Error;

/// Ordered prefix table; the first entry whose prefix the path starts with wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteAccessTable {
    entries: Vec<RouteAccessEntry>,
}

/// Outcome of resolving a path against the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision<'a> {
    /// Path is not protected.
    Unrestricted,
    /// Path needs this permission.
    Requires(&'a str),
}

/// Why a page request was turned away.
///
/// Only logged; every variant produces the same redirect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessDenied {
    /// No session cookie.
    #[error("session token missing")]
    MissingToken,
    /// Token failed verification.
    #[error("session token invalid: {0}")]
    InvalidToken(String),
    /// Token subject has no user record.
    #[error("user record not found")]
    UserNotFound,
    /// User record has no role.
    #[error("user has no role")]
    NoRole,
    /// Role record is gone.
    #[error("role '{0}' not found")]
    RoleNotFound(String),
    /// Role lacks the mapped permission.
    #[error("role lacks permission '{0}'")]
    MissingPermission(String),
    /// Lookup failed.
    #[error("access lookup failed: {0}")]
    Lookup(String),
}

impl RouteAccessTable {
    /// Builds a table, keeping entry order.
    #[must_use]
    pub fn new(entries: Vec<RouteAccessEntry>) -> Self {
        Self { entries }
    }

    /// Resolves the permission a path requires.
    #[must_use]
    pub fn resolve(&self, path: &str) -> AccessDecision<'_> {
        self.entries
            .iter()
            .find(|entry| path.starts_with(entry.prefix.as_str()))
            .map_or(AccessDecision::Unrestricted, |entry| {
                AccessDecision::Requires(entry.permission.as_str())
            })
    }

    /// Checks a role's access list against the path.
    ///
    /// # Errors
    ///
    /// Returns `AccessDenied::MissingPermission` when the path is guarded and
    /// `access` does not contain its permission.
    pub fn authorize(&self, path: &str, access: &[String]) -> Result<(), AccessDenied> {
        match self.resolve(path) {
            AccessDecision::Unrestricted => Ok(()),
            AccessDecision::Requires(permission) if access.iter().any(|a| a == permission) => {
                Ok(())
            }
            AccessDecision::Requires(permission) => {
                Err(AccessDenied::MissingPermission(permission.to_string()))
            }
        }
    }
}

impl Default for RouteAccessTable {
    fn default() -> Self {
        Self::new(dompet_shared::config::default_route_access())
    }
}

/// Trims permission tokens, drops blanks and duplicates, keeps first-seen order.
#[must_use]
pub fn normalize_access<I, S>(access: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    access
        .into_iter()
        .map(|token| token.as_ref().trim().to_string())
        .filter(|token| !token.is_empty() && seen.insert(token.clone()))
        .collect()
}

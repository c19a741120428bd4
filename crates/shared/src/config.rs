//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtConfig,
    /// Session cookie and page access configuration.
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding the built front-end, served behind the page guard.
    #[serde(default)]
    pub static_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Session token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    86400 // 1 day
}

/// One row of the page path → permission table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RouteAccessEntry {
    /// Path prefix matched with `starts_with`.
    pub prefix: String,
    /// Permission token the caller's role must hold.
    pub permission: String,
}

impl RouteAccessEntry {
    /// Creates a table entry.
    #[must_use]
    pub fn new(prefix: &str, permission: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            permission: permission.to_string(),
        }
    }
}

/// Session cookie and page guard configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Name of the cookie carrying the session token.
    #[serde(default = "default_session_cookie")]
    pub session_cookie: String,
    /// Where denied page requests are redirected.
    #[serde(default = "default_redirect_to")]
    pub redirect_to: String,
    /// Ordered path → permission table, first match wins.
    #[serde(default = "default_route_access")]
    pub route_access: Vec<RouteAccessEntry>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie: default_session_cookie(),
            redirect_to: default_redirect_to(),
            route_access: default_route_access(),
        }
    }
}

fn default_session_cookie() -> String {
    "firebaseToken".to_string()
}

fn default_redirect_to() -> String {
    "/".to_string()
}

/// Default page access table.
///
/// Settings sub-pages come before `/settings` so they resolve to their own
/// permission.
#[must_use]
pub fn default_route_access() -> Vec<RouteAccessEntry> {
    vec![
        RouteAccessEntry::new("/settings/add-users", "add-users"),
        RouteAccessEntry::new("/settings/edit-users", "edit-users"),
        RouteAccessEntry::new("/settings/add-role", "add-role"),
        RouteAccessEntry::new("/settings/edit-role", "edit-role"),
        RouteAccessEntry::new("/dashboard", "dashboard"),
        RouteAccessEntry::new("/transactions", "transactions"),
        RouteAccessEntry::new("/categories", "categories"),
        RouteAccessEntry::new("/budget", "budget"),
        RouteAccessEntry::new("/settings", "settings"),
    ]
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("DOMPET").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

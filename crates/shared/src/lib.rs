//! Shared types, errors, and configuration for Dompet.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types
//! - Configuration management
//! - Session token (JWT) handling
//! - Authentication request/response payloads

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;


pub use auth::Claims;
pub use config::{AppConfig, RouteAccessEntry};
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService};

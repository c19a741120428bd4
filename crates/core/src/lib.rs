//! Core business logic for Dompet.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `auth` - Password hashing and policy
//! - `period` - Month keys, transaction dates, dashboard periods
//! - `category` - Category validation and the parent/child tree
//! - `transaction` - Transaction validation and listing filters
//! - `budget` - Budget usage and status calculation
//! - `access` - Page path to permission resolution
//! - `role` - Named permission sets
//! - `user` - Local identity records
//! - `dashboard` - Read-only analytics

pub mod access;
pub mod auth;
pub mod budget;
pub mod category;
pub mod dashboard;
pub mod period;
pub mod role;
pub mod transaction;
pub mod user;

//! Local identity store credentials.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - Password verification
//! - The password length policy applied when users are created or edited

mod password;

pub use password::{
    MIN_PASSWORD_LEN, PasswordError, check_password_policy, hash_password, verify_password,
};

//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT generation/validation and token hashing for the logout blacklist.

pub mod jwt;
pub mod password;

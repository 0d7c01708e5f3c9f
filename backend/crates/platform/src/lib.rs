//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographically secure randomness (TOTP secret material)
//! - Password hashing (Argon2id) for the account registration flow

pub mod crypto;
pub mod password;

//! Account Backend Module
//!
//! Application users registered by phone number.
//!
//! Clean Architecture structure:
//! - `domain/` - User entity, phone number value object, repository trait
//! - `application/` - Registration use case and configuration
//! - `infra/` - PostgreSQL repository
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Credentials
//! - Local accounts carry an Argon2id password hash
//! - Accounts backed by an external identity provider carry its UID and
//!   may omit the password

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AccountConfig;
pub use error::{AccountError, AccountResult};
pub use infra::postgres::PgUserRepository;
pub use presentation::router::{account_router, account_router_generic};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

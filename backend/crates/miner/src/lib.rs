//! Miner Registry Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, document policy, repository traits
//! - `application/` - Registration workflow, TOTP and query use cases
//! - `infra/` - PostgreSQL repository and local-disk document store
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Miner registration (multipart) for title holders and subsistence miners
//! - Per-category document requirements with size and type limits
//! - One TOTP credential per miner, issued at registration
//! - Paginated listing, lookup and soft delete
//!
//! ## Registration Model
//! - Every applicable document is validated before anything is written
//! - Files already written are removed when a later step fails
//! - The TOTP secret never leaves the workflow after provisioning

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::MinerConfig;
pub use error::{MinerError, MinerResult};
pub use infra::{file_store::LocalFileStore, postgres::PgMinerRepository};
pub use presentation::router::{miner_router, miner_router_generic};

pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

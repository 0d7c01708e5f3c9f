//! Presentation Layer

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::AccountAppState;
pub use router::{account_router, account_router_generic};

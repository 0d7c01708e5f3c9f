//! Presentation Layer
//!
//! HTTP handlers, DTOs and router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::MinerAppState;
pub use router::{miner_router, miner_router_generic};

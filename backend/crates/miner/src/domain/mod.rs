//! Domain Layer
//!
//! Contains entities, value objects, the document validator and
//! repository traits.

pub mod entity;
pub mod repository;
pub mod services;
pub mod value_object;

// Re-exports
pub use entity::miner::{DocumentPaths, Miner, MinerIdentity};
pub use repository::{DocumentStore, MinerRepository};

//! Infrastructure Layer
//!
//! Database and filesystem implementations.

pub mod file_store;
pub mod postgres;

pub use file_store::LocalFileStore;
pub use postgres::PgMinerRepository;

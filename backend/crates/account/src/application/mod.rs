//! Application Layer

pub mod config;
pub mod register_user;

// Re-exports
pub use config::AccountConfig;
pub use register_user::{RegisterUserInput, RegisterUserUseCase};

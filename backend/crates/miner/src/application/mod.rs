//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod miner_totp;
pub mod query_miners;
pub mod register_miner;

// Re-exports
pub use config::MinerConfig;
pub use miner_totp::{CurrentCodeOutput, MinerTotpUseCase};
pub use query_miners::MinerQueryUseCase;
pub use register_miner::{
    ProvisioningStage, RegisterMinerInput, RegisterMinerOutput, RegisterMinerUseCase,
};

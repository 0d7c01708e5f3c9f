//! Entity Module

pub mod miner;

pub use miner::{DocumentPaths, Miner, MinerIdentity};

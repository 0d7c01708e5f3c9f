//! Application Configuration
//!
//! Configuration for the miner registry application layer.

use std::path::PathBuf;

use crate::domain::value_object::document_policy::MEGABYTE;

/// Miner registry configuration
#[derive(Debug, Clone)]
pub struct MinerConfig {
    /// Directory documents are stored under
    pub upload_root: PathBuf,
    /// Issuer shown by authenticator apps
    pub totp_issuer: String,
    /// Ceiling for a whole registration request (500 MiB)
    pub max_request_bytes: usize,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            upload_root: PathBuf::from("./uploads"),
            totp_issuer: "Batea Fintech".to_string(),
            max_request_bytes: (500 * MEGABYTE) as usize,
        }
    }
}

impl MinerConfig {
    /// Override the upload root
    pub fn with_upload_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.upload_root = root.into();
        self
    }
}

//! Repository Traits
//!
//! Interfaces for persistence and document storage. Implementations are
//! in the infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::id::MinerId;
use kernel::pagination::PageRequest;

use crate::domain::entity::miner::Miner;
use crate::domain::value_object::email::Email;
use crate::error::MinerResult;

/// Miner repository trait
///
/// Lookups never return soft-deleted miners.
#[trait_variant::make(MinerRepository: Send)]
pub trait LocalMinerRepository {
    /// Insert a new miner.
    ///
    /// A clash on email or ID number yields `MinerError::DuplicateMiner`.
    async fn create(&self, miner: &Miner) -> MinerResult<()>;

    /// Find miner by ID
    async fn find_by_id(&self, id: &MinerId) -> MinerResult<Option<Miner>>;

    /// Find miner by email
    async fn find_by_email(&self, email: &Email) -> MinerResult<Option<Miner>>;

    /// One page, newest first, plus the total row count
    async fn find_page(&self, page: PageRequest) -> MinerResult<(Vec<Miner>, i64)>;

    /// Set `deleted_at`; returns false when no live miner matched
    async fn soft_delete(&self, id: &MinerId, at: DateTime<Utc>) -> MinerResult<bool>;
}

/// Document store trait
#[trait_variant::make(DocumentStore: Send)]
pub trait LocalDocumentStore {
    /// Write `bytes` to `<root>/<subdir>/<filename>` and return
    /// `<subdir>/<sanitized filename>`
    async fn save(&self, subdir: &str, filename: &str, bytes: &[u8]) -> MinerResult<String>;

    /// Delete a path returned by `save`; a missing file is not an error
    async fn remove(&self, relative_path: &str) -> MinerResult<()>;
}

//! Miner Query Use Case
//!
//! Lookup, paginated listing and soft delete.

use chrono::{DateTime, Utc};
use kernel::id::MinerId;
use kernel::pagination::{Page, PageRequest};
use std::sync::Arc;

use crate::domain::entity::miner::Miner;
use crate::domain::repository::MinerRepository;
use crate::error::{MinerError, MinerResult};

pub struct MinerQueryUseCase<R>
where
    R: MinerRepository,
{
    repo: Arc<R>,
}

impl<R> MinerQueryUseCase<R>
where
    R: MinerRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn get(&self, miner_id: &MinerId) -> MinerResult<Miner> {
        self.repo
            .find_by_id(miner_id)
            .await?
            .ok_or(MinerError::MinerNotFound)
    }

    pub async fn list(&self, request: PageRequest) -> MinerResult<Page<Miner>> {
        let (miners, total_rows) = self.repo.find_page(request).await?;
        Ok(Page::new(request, total_rows, miners))
    }

    pub async fn delete(&self, miner_id: &MinerId) -> MinerResult<()> {
        self.delete_at(miner_id, Utc::now()).await
    }

    pub async fn delete_at(&self, miner_id: &MinerId, now: DateTime<Utc>) -> MinerResult<()> {
        if !self.repo.soft_delete(miner_id, now).await? {
            return Err(MinerError::MinerNotFound);
        }

        tracing::info!(miner_id = %miner_id, "Miner soft-deleted");

        Ok(())
    }
}

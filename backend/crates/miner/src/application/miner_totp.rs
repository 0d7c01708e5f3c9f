//! Miner TOTP Use Case
//!
//! Re-derives and checks codes from a miner's stored secret. The secret
//! itself is never returned.

use chrono::{DateTime, Utc};
use kernel::id::MinerId;
use std::sync::Arc;

use crate::application::config::MinerConfig;
use crate::domain::entity::miner::Miner;
use crate::domain::repository::MinerRepository;
use crate::domain::value_object::totp_secret::TotpSecret;
use crate::error::{MinerError, MinerResult};

/// Current code output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentCodeOutput {
    pub code: String,
    /// Seconds until the code's step ends
    pub expires_in_secs: u64,
}

/// Miner TOTP use case
pub struct MinerTotpUseCase<R>
where
    R: MinerRepository,
{
    repo: Arc<R>,
    config: Arc<MinerConfig>,
}

impl<R> MinerTotpUseCase<R>
where
    R: MinerRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<MinerConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn current_code(&self, miner_id: &MinerId) -> MinerResult<CurrentCodeOutput> {
        self.current_code_at(miner_id, Utc::now()).await
    }

    pub async fn current_code_at(
        &self,
        miner_id: &MinerId,
        now: DateTime<Utc>,
    ) -> MinerResult<CurrentCodeOutput> {
        let miner = self.load(miner_id).await?;
        let secret = secret_of(&miner)?;

        let code = secret.code_at(&self.config.totp_issuer, miner.email.as_str(), now)?;

        tracing::debug!(miner_id = %miner_id, "TOTP code derived");

        Ok(CurrentCodeOutput {
            code,
            expires_in_secs: TotpSecret::seconds_remaining(now),
        })
    }

    pub async fn validate_code(&self, miner_id: &MinerId, code: &str) -> MinerResult<()> {
        self.validate_code_at(miner_id, code, Utc::now()).await
    }

    /// Accepts the step containing `now` and one step either side
    pub async fn validate_code_at(
        &self,
        miner_id: &MinerId,
        code: &str,
        now: DateTime<Utc>,
    ) -> MinerResult<()> {
        let miner = self.load(miner_id).await?;
        let secret = secret_of(&miner)?;

        let valid = secret.verify_at(code, &self.config.totp_issuer, miner.email.as_str(), now)?;
        if !valid {
            return Err(MinerError::InvalidOrExpiredCode);
        }

        tracing::info!(miner_id = %miner_id, "TOTP code accepted");

        Ok(())
    }

    async fn load(&self, miner_id: &MinerId) -> MinerResult<Miner> {
        self.repo
            .find_by_id(miner_id)
            .await?
            .ok_or(MinerError::MinerNotFound)
    }
}

fn secret_of(miner: &Miner) -> MinerResult<&TotpSecret> {
    miner
        .totp_secret
        .as_ref()
        .ok_or(MinerError::NoCredentialConfigured)
}

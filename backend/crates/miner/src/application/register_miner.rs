//! Register Miner Use Case
//!
//! Validates a registration, stores its documents, issues the TOTP
//! credential and persists the miner:
//!
//! `Validating -> SavingFiles -> GeneratingCredential -> Persisting -> Done`
//!
//! A failure at any stage ends the call. Documents written by the call
//! are removed again before the error is returned.

use chrono::{DateTime, Utc};
use kernel::id::MinerId;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::application::config::MinerConfig;
use crate::domain::entity::miner::{DocumentPaths, Miner, MinerIdentity};
use crate::domain::repository::{DocumentStore, MinerRepository};
use crate::domain::services::validate_all;
use crate::domain::value_object::{
    document_policy::{applicable_policies, policy_for},
    document_role::DocumentRole,
    email::Email,
    id_number::IdNumber,
    miner_category::MinerCategory,
    person_name::PersonName,
    totp_secret::{TotpProvisioning, TotpSecret},
    uploaded_document::UploadedDocument,
};
use crate::error::{MinerError, MinerResult};

const PHONE_MAX_LENGTH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisioningStage {
    Validating,
    SavingFiles,
    GeneratingCredential,
    Persisting,
    Done,
}

impl fmt::Display for ProvisioningStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProvisioningStage::Validating => "validating",
            ProvisioningStage::SavingFiles => "saving_files",
            ProvisioningStage::GeneratingCredential => "generating_credential",
            ProvisioningStage::Persisting => "persisting",
            ProvisioningStage::Done => "done",
        })
    }
}

/// Register miner input
#[derive(Debug, Clone, Default)]
pub struct RegisterMinerInput {
    pub full_name: String,
    pub last_name: String,
    pub id_number: String,
    pub phone_number: Option<String>,
    pub email: String,
    /// `titular` or `subsistencia`
    pub category: String,
    pub documents: Vec<UploadedDocument>,
}

/// Register miner output
///
/// `miner` still carries the secret; callers must not serialize it.
#[derive(Debug)]
pub struct RegisterMinerOutput {
    pub miner: Miner,
    /// Code for the step containing the registration instant
    pub totp_code: String,
    pub provisioning: TotpProvisioning,
}

/// Register miner use case
pub struct RegisterMinerUseCase<R, S>
where
    R: MinerRepository,
    S: DocumentStore,
{
    repo: Arc<R>,
    store: Arc<S>,
    config: Arc<MinerConfig>,
}

impl<R, S> RegisterMinerUseCase<R, S>
where
    R: MinerRepository,
    S: DocumentStore,
{
    pub fn new(repo: Arc<R>, store: Arc<S>, config: Arc<MinerConfig>) -> Self {
        Self {
            repo,
            store,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterMinerInput) -> MinerResult<RegisterMinerOutput> {
        self.execute_at(input, Utc::now()).await
    }

    /// Run the workflow with `now` as the registration instant
    pub async fn execute_at(
        &self,
        input: RegisterMinerInput,
        now: DateTime<Utc>,
    ) -> MinerResult<RegisterMinerOutput> {
        let mut stage = ProvisioningStage::Validating;
        let mut written = Vec::new();

        let result = self.provision(input, now, &mut stage, &mut written).await;
        match result {
            Ok(output) => {
                tracing::info!(
                    miner_id = %output.miner.id,
                    category = %output.miner.category,
                    documents = output.miner.documents.len(),
                    "Miner registered"
                );
                Ok(output)
            }
            Err(err) => {
                tracing::warn!(stage = %stage, error = %err, "Miner registration failed");
                self.discard(&written).await;
                Err(err)
            }
        }
    }

    async fn provision(
        &self,
        input: RegisterMinerInput,
        now: DateTime<Utc>,
        stage: &mut ProvisioningStage,
        written: &mut Vec<String>,
    ) -> MinerResult<RegisterMinerOutput> {
        advance(stage, ProvisioningStage::Validating);
        let category = MinerCategory::parse(&input.category)?;
        let identity = MinerIdentity {
            full_name: PersonName::new(&input.full_name, "full_name")?,
            last_name: PersonName::new(&input.last_name, "last_name")?,
            id_number: IdNumber::new(input.id_number)?,
            phone_number: normalize_phone(input.phone_number)?,
            email: Email::new(input.email)?,
            category,
        };
        let documents = collect_documents(category, input.documents)?;
        validate_all(category, &documents).map_err(MinerError::Validation)?;

        advance(stage, ProvisioningStage::SavingFiles);
        let miner_id = MinerId::new();
        let mut paths = DocumentPaths::new();
        for policy in applicable_policies(category) {
            let Some(document) = documents.get(&policy.role) else {
                continue;
            };
            let filename = stored_filename(&miner_id, policy.role, &document.filename);
            let path = self
                .store
                .save(policy.subdir, &filename, &document.content)
                .await?;
            written.push(path.clone());
            paths.insert(policy.role, path);
        }

        advance(stage, ProvisioningStage::GeneratingCredential);
        let issuer = self.config.totp_issuer.as_str();
        let account = identity.email.as_str().to_string();
        let secret = TotpSecret::generate();
        let provisioning = secret.provisioning(issuer, &account)?;
        let totp_code = secret.code_at(issuer, &account, now)?;

        advance(stage, ProvisioningStage::Persisting);
        let miner = Miner::new(miner_id, identity, paths, secret, now)?;
        self.repo.create(&miner).await?;

        advance(stage, ProvisioningStage::Done);
        Ok(RegisterMinerOutput {
            miner,
            totp_code,
            provisioning,
        })
    }

    /// Best-effort removal of documents written by a failed call
    async fn discard(&self, written: &[String]) {
        for path in written.iter().rev() {
            if let Err(e) = self.store.remove(path).await {
                tracing::warn!(path = %path, error = %e, "Failed to remove orphaned document");
            }
        }
    }
}

fn advance(stage: &mut ProvisioningStage, next: ProvisioningStage) {
    *stage = next;
    tracing::debug!(stage = %next, "Miner registration stage");
}

/// Key documents by role. Roles that do not apply to the category are
/// dropped; a role supplied twice is rejected.
fn collect_documents(
    category: MinerCategory,
    documents: Vec<UploadedDocument>,
) -> MinerResult<BTreeMap<DocumentRole, UploadedDocument>> {
    let mut by_role = BTreeMap::new();
    for document in documents {
        let role = document.role;
        if policy_for(role, category).is_none() {
            tracing::info!(
                role = %role,
                category = %category,
                "Ignoring document that does not apply to category"
            );
            continue;
        }
        if by_role.insert(role, document).is_some() {
            return Err(MinerError::InvalidField {
                field: role.as_str(),
                reason: "supplied more than once".to_string(),
            });
        }
    }
    Ok(by_role)
}

fn normalize_phone(phone: Option<String>) -> MinerResult<Option<String>> {
    let Some(phone) = phone.map(|p| p.trim().to_string()).filter(|p| !p.is_empty()) else {
        return Ok(None);
    };
    let invalid = |reason: &str| MinerError::InvalidField {
        field: "phone_number",
        reason: reason.to_string(),
    };
    if phone.chars().count() > PHONE_MAX_LENGTH {
        return Err(invalid("too long"));
    }
    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')'))
    {
        return Err(invalid("may only contain digits, spaces and + - ( )"));
    }
    if !phone.chars().any(|c| c.is_ascii_digit()) {
        return Err(invalid("must contain digits"));
    }
    Ok(Some(phone))
}

/// Longest declared name kept in a stored filename, in bytes
const DECLARED_NAME_MAX_BYTES: usize = 100;
const EXTENSION_MAX_BYTES: usize = 16;

/// `<miner id>-<role>-<declared name>`; two roles sharing a directory
/// never collide.
fn stored_filename(miner_id: &MinerId, role: DocumentRole, declared: &str) -> String {
    let declared = shorten_declared(client_basename(declared));
    if declared.is_empty() {
        format!("{}-{}", miner_id, role)
    } else {
        format!("{}-{}-{}", miner_id, role, declared)
    }
}

/// Some clients send the full local path (`C:\Users\...\id.png`).
fn client_basename(declared: &str) -> &str {
    let declared = declared.trim();
    declared
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(declared)
        .trim()
}

/// Cap the name at `DECLARED_NAME_MAX_BYTES`, keeping a short extension.
fn shorten_declared(declared: &str) -> String {
    if declared.len() <= DECLARED_NAME_MAX_BYTES {
        return declared.to_string();
    }
    match declared.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() && ext.len() <= EXTENSION_MAX_BYTES => {
            let stem = truncate_at_char(stem, DECLARED_NAME_MAX_BYTES - ext.len() - 1);
            format!("{}.{}", stem, ext)
        }
        _ => truncate_at_char(declared, DECLARED_NAME_MAX_BYTES).to_string(),
    }
}

fn truncate_at_char(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_filename() {
        let id = MinerId::new();
        assert_eq!(
            stored_filename(&id, DocumentRole::IdFront, " cedula.png "),
            format!("{}-id_front-cedula.png", id)
        );
        assert_eq!(
            stored_filename(&id, DocumentRole::IdBack, ""),
            format!("{}-id_back", id)
        );
    }

    #[test]
    fn test_stored_filename_strips_client_path() {
        let id = MinerId::new();
        assert_eq!(
            stored_filename(&id, DocumentRole::IdFront, r"C:\Users\ana\Desktop\cedula.png"),
            format!("{}-id_front-cedula.png", id)
        );
        assert_eq!(
            stored_filename(&id, DocumentRole::IdBack, "/home/ana/reverso.jpg"),
            format!("{}-id_back-reverso.jpg", id)
        );
        assert_eq!(
            stored_filename(&id, DocumentRole::IdBack, "fotos/"),
            format!("{}-id_back", id)
        );
    }

    #[test]
    fn test_stored_filename_caps_long_names() {
        let id = MinerId::new();
        let name = stored_filename(&id, DocumentRole::IdFront, &format!("{}.png", "c".repeat(220)));
        let declared = name
            .strip_prefix(&format!("{}-id_front-", id))
            .unwrap();
        assert_eq!(declared.len(), DECLARED_NAME_MAX_BYTES);
        assert!(declared.ends_with(".png"));

        // multi-byte characters are never split
        let name = stored_filename(&id, DocumentRole::IdFront, &format!("{}.pdf", "ñ".repeat(80)));
        assert!(name.ends_with(".pdf"));
        assert!(name.len() <= 36 + "-id_front-".len() + DECLARED_NAME_MAX_BYTES);

        let name = stored_filename(&id, DocumentRole::IdFront, &"x".repeat(300));
        assert!(name.ends_with(&"x".repeat(DECLARED_NAME_MAX_BYTES)));
    }

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone(None).unwrap(), None);
        assert_eq!(normalize_phone(Some("   ".into())).unwrap(), None);
        assert_eq!(
            normalize_phone(Some(" +57 300 123 4567 ".into())).unwrap().as_deref(),
            Some("+57 300 123 4567")
        );
        assert!(normalize_phone(Some("call me".into())).is_err());
        assert!(normalize_phone(Some("+".into())).is_err());
        assert!(normalize_phone(Some("1".repeat(21))).is_err());
    }

    #[test]
    fn test_collect_documents_drops_inapplicable_and_rejects_duplicates() {
        let doc = |role| UploadedDocument::new(role, vec![1u8], None, "x.pdf");

        let docs = collect_documents(
            MinerCategory::TitleHolder,
            vec![doc(DocumentRole::Rucon), doc(DocumentRole::ExploitationContract)],
        )
        .unwrap();
        assert_eq!(docs.len(), 1);
        assert!(docs.contains_key(&DocumentRole::ExploitationContract));

        let err = collect_documents(
            MinerCategory::Subsistence,
            vec![doc(DocumentRole::Rucon), doc(DocumentRole::Rucon)],
        )
        .unwrap_err();
        assert!(matches!(err, MinerError::InvalidField { field: "rucon", .. }));
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(ProvisioningStage::SavingFiles.to_string(), "saving_files");
        assert_eq!(ProvisioningStage::Done.to_string(), "done");
    }
}

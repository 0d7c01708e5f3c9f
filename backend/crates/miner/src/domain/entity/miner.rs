//! Miner Entity
//!
//! A registered miner with identity fields, stored document paths and
//! TOTP credential.

use chrono::{DateTime, Utc};
use kernel::id::MinerId;
use std::collections::BTreeMap;

use crate::domain::value_object::{
    document_policy::policy_for, document_role::DocumentRole, email::Email, id_number::IdNumber,
    miner_category::MinerCategory, person_name::PersonName, totp_secret::TotpSecret,
};
use crate::error::{MinerError, MinerResult};

/// Relative storage path per document role
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentPaths(BTreeMap<DocumentRole, String>);

impl DocumentPaths {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, role: DocumentRole, path: impl Into<String>) {
        self.0.insert(role, path.into());
    }

    pub fn get(&self, role: DocumentRole) -> Option<&str> {
        self.0.get(&role).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (DocumentRole, &str)> {
        self.0.iter().map(|(role, path)| (*role, path.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(DocumentRole, String)> for DocumentPaths {
    fn from_iter<I: IntoIterator<Item = (DocumentRole, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Miner entity
#[derive(Debug, Clone)]
pub struct Miner {
    pub id: MinerId,
    pub full_name: PersonName,
    pub last_name: PersonName,
    pub id_number: IdNumber,
    pub phone_number: Option<String>,
    pub email: Email,
    pub category: MinerCategory,
    pub documents: DocumentPaths,
    /// `None` only for rows registered before credentials were issued
    pub totp_secret: Option<TotpSecret>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Identity fields of a new registration
#[derive(Debug, Clone)]
pub struct MinerIdentity {
    pub full_name: PersonName,
    pub last_name: PersonName,
    pub id_number: IdNumber,
    pub phone_number: Option<String>,
    pub email: Email,
    pub category: MinerCategory,
}

impl Miner {
    /// Assemble a newly provisioned miner.
    ///
    /// Fails if `documents` holds a path for a role that does not apply
    /// to the category.
    pub fn new(
        id: MinerId,
        identity: MinerIdentity,
        documents: DocumentPaths,
        totp_secret: TotpSecret,
        now: DateTime<Utc>,
    ) -> MinerResult<Self> {
        check_paths(identity.category, &documents)?;

        Ok(Self {
            id,
            full_name: identity.full_name,
            last_name: identity.last_name,
            id_number: identity.id_number,
            phone_number: identity.phone_number,
            email: identity.email,
            category: identity.category,
            documents,
            totp_secret: Some(totp_secret),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        })
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Mark as deleted; the row stays in storage
    pub fn soft_delete(&mut self, now: DateTime<Utc>) {
        self.deleted_at = Some(now);
        self.updated_at = now;
    }
}

pub(crate) fn check_paths(category: MinerCategory, documents: &DocumentPaths) -> MinerResult<()> {
    match documents
        .iter()
        .find(|(role, _)| policy_for(*role, category).is_none())
    {
        Some((role, _)) => Err(MinerError::Internal(format!(
            "document {} does not apply to category {}",
            role, category
        ))),
        None => Ok(()),
    }
}

//! Document Validator
//!
//! Pure checks of uploaded documents against the policy table.

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::domain::value_object::{
    document_policy::{DocumentPolicy, applicable_policies, policy_for},
    document_role::DocumentRole,
    miner_category::MinerCategory,
    uploaded_document::UploadedDocument,
};

/// A single document that fails its policy
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "violation", rename_all = "snake_case")]
pub enum DocumentViolation {
    #[error("{role} is required")]
    MissingRequiredDocument { role: DocumentRole },

    #[error("{role} is {actual} bytes, limit is {max}")]
    DocumentTooLarge {
        role: DocumentRole,
        actual: u64,
        max: u64,
    },

    #[error("{role} has unsupported type {declared:?}, allowed: {allowed:?}")]
    UnsupportedDocumentType {
        role: DocumentRole,
        declared: String,
        allowed: Vec<String>,
    },
}

impl DocumentViolation {
    pub fn role(&self) -> DocumentRole {
        match self {
            DocumentViolation::MissingRequiredDocument { role }
            | DocumentViolation::DocumentTooLarge { role, .. }
            | DocumentViolation::UnsupportedDocumentType { role, .. } => *role,
        }
    }
}

/// Check one role for `category`.
///
/// A role with no policy for the category is not applicable and passes.
pub fn validate_document(
    role: DocumentRole,
    category: MinerCategory,
    document: Option<&UploadedDocument>,
) -> Result<(), DocumentViolation> {
    match policy_for(role, category) {
        Some(policy) => check_against(policy, document),
        None => Ok(()),
    }
}

/// Check every role that applies to `category`, collecting all violations
/// in policy-table order.
pub fn validate_all(
    category: MinerCategory,
    documents: &BTreeMap<DocumentRole, UploadedDocument>,
) -> Result<(), Vec<DocumentViolation>> {
    let violations: Vec<_> = applicable_policies(category)
        .filter_map(|policy| check_against(policy, documents.get(&policy.role)).err())
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn check_against(
    policy: &DocumentPolicy,
    document: Option<&UploadedDocument>,
) -> Result<(), DocumentViolation> {
    let Some(document) = document else {
        return if policy.required {
            Err(DocumentViolation::MissingRequiredDocument { role: policy.role })
        } else {
            Ok(())
        };
    };

    if document.size() > policy.max_bytes {
        return Err(DocumentViolation::DocumentTooLarge {
            role: policy.role,
            actual: document.size(),
            max: policy.max_bytes,
        });
    }

    if !type_allowed(policy.allowed_types, document) {
        return Err(DocumentViolation::UnsupportedDocumentType {
            role: policy.role,
            declared: document.content_type.clone().unwrap_or_default(),
            allowed: policy.allowed_types.iter().map(|t| t.to_string()).collect(),
        });
    }

    Ok(())
}

/// Content type contains an allowed token, or the extension equals one
fn type_allowed(allowed: &[&str], document: &UploadedDocument) -> bool {
    let by_content_type = document
        .content_type
        .as_deref()
        .map(str::to_ascii_lowercase)
        .is_some_and(|ct| allowed.iter().any(|token| ct.contains(token)));

    by_content_type
        || document
            .extension()
            .is_some_and(|ext| allowed.iter().any(|token| ext == *token))
}

//! Document Policy Table
//!
//! Requirements per (category, role): whether the document is required,
//! its size ceiling, the accepted content types and where it is stored.
//! A role with no entry for a category does not apply to it.

use super::document_role::DocumentRole;
use super::miner_category::MinerCategory;

/// 1 MiB
pub const MEGABYTE: u64 = 1024 * 1024;

const IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png"];
const PDF_TYPES: &[&str] = &["application/pdf", "pdf"];

/// Which categories a policy entry covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applicability {
    Both,
    Only(MinerCategory),
}

impl Applicability {
    pub fn covers(&self, category: MinerCategory) -> bool {
        match self {
            Applicability::Both => true,
            Applicability::Only(c) => *c == category,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentPolicy {
    pub role: DocumentRole,
    pub applies_to: Applicability,
    pub required: bool,
    pub max_bytes: u64,
    pub allowed_types: &'static [&'static str],
    /// Directory under the upload root
    pub subdir: &'static str,
}

pub const POLICIES: &[DocumentPolicy] = &[
    DocumentPolicy {
        role: DocumentRole::IdFront,
        applies_to: Applicability::Both,
        required: true,
        max_bytes: 5 * MEGABYTE,
        allowed_types: IMAGE_TYPES,
        subdir: "cedulas",
    },
    DocumentPolicy {
        role: DocumentRole::IdBack,
        applies_to: Applicability::Both,
        required: true,
        max_bytes: 5 * MEGABYTE,
        allowed_types: IMAGE_TYPES,
        subdir: "cedulas",
    },
    DocumentPolicy {
        role: DocumentRole::FacialPhoto,
        applies_to: Applicability::Both,
        required: true,
        max_bytes: 5 * MEGABYTE,
        allowed_types: IMAGE_TYPES,
        subdir: "facial",
    },
    DocumentPolicy {
        role: DocumentRole::Rucon,
        applies_to: Applicability::Only(MinerCategory::Subsistence),
        required: true,
        max_bytes: 2 * MEGABYTE,
        allowed_types: PDF_TYPES,
        subdir: "subsistencia/rucon",
    },
    DocumentPolicy {
        role: DocumentRole::OtherDoc,
        applies_to: Applicability::Only(MinerCategory::Subsistence),
        required: false,
        max_bytes: 10 * MEGABYTE,
        allowed_types: PDF_TYPES,
        subdir: "subsistencia/otros",
    },
    DocumentPolicy {
        role: DocumentRole::ExploitationContract,
        applies_to: Applicability::Only(MinerCategory::TitleHolder),
        required: true,
        max_bytes: 15 * MEGABYTE,
        allowed_types: PDF_TYPES,
        subdir: "titular/contrato",
    },
    DocumentPolicy {
        role: DocumentRole::EnvironmentalPermit,
        applies_to: Applicability::Only(MinerCategory::TitleHolder),
        required: true,
        max_bytes: 75 * MEGABYTE,
        allowed_types: PDF_TYPES,
        subdir: "titular/ambiental",
    },
    DocumentPolicy {
        role: DocumentRole::TechnicalPermit,
        applies_to: Applicability::Only(MinerCategory::TitleHolder),
        required: true,
        max_bytes: 50 * MEGABYTE,
        allowed_types: PDF_TYPES,
        subdir: "titular/tecnica",
    },
];

/// Policy for `role` under `category`, `None` when the role does not apply
pub fn policy_for(role: DocumentRole, category: MinerCategory) -> Option<&'static DocumentPolicy> {
    POLICIES
        .iter()
        .find(|p| p.role == role && p.applies_to.covers(category))
}

/// All policies that apply to `category`, in table order
pub fn applicable_policies(
    category: MinerCategory,
) -> impl Iterator<Item = &'static DocumentPolicy> {
    POLICIES.iter().filter(move |p| p.applies_to.covers(category))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_holder_roles() {
        let roles: Vec<_> = applicable_policies(MinerCategory::TitleHolder)
            .map(|p| p.role)
            .collect();
        assert_eq!(
            roles,
            vec![
                DocumentRole::IdFront,
                DocumentRole::IdBack,
                DocumentRole::FacialPhoto,
                DocumentRole::ExploitationContract,
                DocumentRole::EnvironmentalPermit,
                DocumentRole::TechnicalPermit,
            ]
        );
        assert!(policy_for(DocumentRole::Rucon, MinerCategory::TitleHolder).is_none());
    }

    #[test]
    fn test_subsistence_roles() {
        assert!(policy_for(DocumentRole::ExploitationContract, MinerCategory::Subsistence).is_none());
        let rucon = policy_for(DocumentRole::Rucon, MinerCategory::Subsistence).unwrap();
        assert!(rucon.required);
        assert_eq!(rucon.max_bytes, 2 * MEGABYTE);
        let other = policy_for(DocumentRole::OtherDoc, MinerCategory::Subsistence).unwrap();
        assert!(!other.required);
        assert_eq!(other.max_bytes, 10 * MEGABYTE);
    }

    #[test]
    fn test_one_entry_per_role_and_category() {
        for category in MinerCategory::ALL {
            for role in DocumentRole::ALL {
                let n = POLICIES
                    .iter()
                    .filter(|p| p.role == role && p.applies_to.covers(category))
                    .count();
                assert!(n <= 1, "{role} has {n} entries for {category}");
            }
        }
    }

    #[test]
    fn test_size_ceilings() {
        let max = |role| policy_for(role, MinerCategory::TitleHolder).unwrap().max_bytes;
        assert_eq!(max(DocumentRole::IdFront), 5 * MEGABYTE);
        assert_eq!(max(DocumentRole::ExploitationContract), 15 * MEGABYTE);
        assert_eq!(max(DocumentRole::EnvironmentalPermit), 75 * MEGABYTE);
        assert_eq!(max(DocumentRole::TechnicalPermit), 50 * MEGABYTE);
    }
}

//! Document Role Value Object
//!
//! The slot a file fills in a registration (ID front, RUCON, ...).

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentRole {
    IdFront,
    IdBack,
    FacialPhoto,
    Rucon,
    OtherDoc,
    ExploitationContract,
    EnvironmentalPermit,
    TechnicalPermit,
}

impl DocumentRole {
    pub const ALL: [DocumentRole; 8] = [
        DocumentRole::IdFront,
        DocumentRole::IdBack,
        DocumentRole::FacialPhoto,
        DocumentRole::Rucon,
        DocumentRole::OtherDoc,
        DocumentRole::ExploitationContract,
        DocumentRole::EnvironmentalPermit,
        DocumentRole::TechnicalPermit,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            DocumentRole::IdFront => "id_front",
            DocumentRole::IdBack => "id_back",
            DocumentRole::FacialPhoto => "facial_photo",
            DocumentRole::Rucon => "rucon",
            DocumentRole::OtherDoc => "other_doc",
            DocumentRole::ExploitationContract => "exploitation_contract",
            DocumentRole::EnvironmentalPermit => "environmental_permit",
            DocumentRole::TechnicalPermit => "technical_permit",
        }
    }

    /// Resolve a multipart field name.
    ///
    /// Accepts the canonical names plus the names used by the mobile
    /// registration form (`id_photo_front`, `environmental_tool`, ...).
    pub fn from_field_name(name: &str) -> Option<Self> {
        let role = match name.trim() {
            "id_front" | "id_photo_front" => DocumentRole::IdFront,
            "id_back" | "id_photo_back" => DocumentRole::IdBack,
            "facial_photo" => DocumentRole::FacialPhoto,
            "rucon" => DocumentRole::Rucon,
            "other_doc" => DocumentRole::OtherDoc,
            "exploitation_contract" => DocumentRole::ExploitationContract,
            "environmental_permit" | "environmental_tool" => DocumentRole::EnvironmentalPermit,
            "technical_permit" | "technical_tool" => DocumentRole::TechnicalPermit,
            _ => return None,
        };
        Some(role)
    }

    /// Database column holding this role's storage path
    pub const fn path_column(&self) -> &'static str {
        match self {
            DocumentRole::IdFront => "id_front_path",
            DocumentRole::IdBack => "id_back_path",
            DocumentRole::FacialPhoto => "facial_photo_path",
            DocumentRole::Rucon => "rucon_path",
            DocumentRole::OtherDoc => "other_doc_path",
            DocumentRole::ExploitationContract => "exploitation_contract_path",
            DocumentRole::EnvironmentalPermit => "environmental_permit_path",
            DocumentRole::TechnicalPermit => "technical_permit_path",
        }
    }
}

impl fmt::Display for DocumentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_name_aliases() {
        assert_eq!(
            DocumentRole::from_field_name("id_photo_front"),
            Some(DocumentRole::IdFront)
        );
        assert_eq!(
            DocumentRole::from_field_name("id_photo_back"),
            Some(DocumentRole::IdBack)
        );
        assert_eq!(
            DocumentRole::from_field_name("environmental_tool"),
            Some(DocumentRole::EnvironmentalPermit)
        );
        assert_eq!(
            DocumentRole::from_field_name("technical_tool"),
            Some(DocumentRole::TechnicalPermit)
        );
        assert_eq!(DocumentRole::from_field_name("full_name"), None);
    }

    #[test]
    fn test_canonical_names_roundtrip() {
        for role in DocumentRole::ALL {
            assert_eq!(DocumentRole::from_field_name(role.as_str()), Some(role));
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
        }
    }
}

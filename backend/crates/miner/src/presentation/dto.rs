//! API DTOs (Data Transfer Objects)
//!
//! Field names are snake_case to match the multipart form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::{CurrentCodeOutput, RegisterMinerOutput};
use crate::domain::entity::miner::Miner;
use crate::domain::value_object::{document_role::DocumentRole, miner_category::MinerCategory};

// ============================================================================
// Miner
// ============================================================================

/// Miner as returned by the API. Never carries the TOTP secret.
#[derive(Debug, Clone, Serialize)]
pub struct MinerResponse {
    pub id: Uuid,
    pub full_name: String,
    pub last_name: String,
    pub id_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub email: String,
    pub miner_type: MinerCategory,
    pub id_front_path: Option<String>,
    pub id_back_path: Option<String>,
    pub facial_photo_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rucon_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_doc_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exploitation_contract_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environmental_permit_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technical_permit_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Miner> for MinerResponse {
    fn from(miner: &Miner) -> Self {
        let path = |role| miner.documents.get(role).map(str::to_string);
        Self {
            id: *miner.id.as_uuid(),
            full_name: miner.full_name.to_string(),
            last_name: miner.last_name.to_string(),
            id_number: miner.id_number.to_string(),
            phone_number: miner.phone_number.clone(),
            email: miner.email.to_string(),
            miner_type: miner.category,
            id_front_path: path(DocumentRole::IdFront),
            id_back_path: path(DocumentRole::IdBack),
            facial_photo_path: path(DocumentRole::FacialPhoto),
            rucon_path: path(DocumentRole::Rucon),
            other_doc_path: path(DocumentRole::OtherDoc),
            exploitation_contract_path: path(DocumentRole::ExploitationContract),
            environmental_permit_path: path(DocumentRole::EnvironmentalPermit),
            technical_permit_path: path(DocumentRole::TechnicalPermit),
            created_at: miner.created_at,
            updated_at: miner.updated_at,
        }
    }
}

// ============================================================================
// Registration
// ============================================================================

/// Registration response
#[derive(Debug, Clone, Serialize)]
pub struct RegisterMinerResponse {
    pub message: String,
    pub miner: MinerResponse,
    /// Code for the current 30 s step
    pub totp_code: String,
    /// otpauth:// URL for authenticator enrolment
    pub provisioning_url: String,
    /// QR code of `provisioning_url` as base64-encoded PNG
    pub qr_code_png: String,
}

impl From<RegisterMinerOutput> for RegisterMinerResponse {
    fn from(output: RegisterMinerOutput) -> Self {
        Self {
            message: "Miner registered successfully".to_string(),
            miner: MinerResponse::from(&output.miner),
            totp_code: output.totp_code,
            provisioning_url: output.provisioning.url,
            qr_code_png: output.provisioning.qr_code_base64,
        }
    }
}

// ============================================================================
// TOTP
// ============================================================================

/// Current code response
#[derive(Debug, Clone, Serialize)]
pub struct TotpCodeResponse {
    pub totp_code: String,
    pub expires_in_secs: u64,
}

impl From<CurrentCodeOutput> for TotpCodeResponse {
    fn from(output: CurrentCodeOutput) -> Self {
        Self {
            totp_code: output.code,
            expires_in_secs: output.expires_in_secs,
        }
    }
}

/// TOTP validate request
#[derive(Debug, Clone, Deserialize)]
pub struct TotpValidateRequest {
    pub code: String,
}

/// TOTP validate response
#[derive(Debug, Clone, Serialize)]
pub struct TotpValidateResponse {
    pub valid: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::miner::{DocumentPaths, MinerIdentity};
    use crate::domain::value_object::{
        email::Email, id_number::IdNumber, person_name::PersonName, totp_secret::TotpSecret,
    };
    use kernel::id::MinerId;

    #[test]
    fn test_miner_response_hides_secret_and_foreign_paths() {
        let secret = TotpSecret::generate();
        let mut docs = DocumentPaths::new();
        docs.insert(DocumentRole::Rucon, "subsistencia/rucon/r.pdf");
        let miner = Miner::new(
            MinerId::new(),
            MinerIdentity {
                full_name: PersonName::new("Ana", "full_name").unwrap(),
                last_name: PersonName::new("Ríos", "last_name").unwrap(),
                id_number: IdNumber::new("1020").unwrap(),
                phone_number: None,
                email: Email::new("ana@example.com").unwrap(),
                category: MinerCategory::Subsistence,
            },
            docs,
            secret.clone(),
            Utc::now(),
        )
        .unwrap();

        let json = serde_json::to_value(MinerResponse::from(&miner)).unwrap();
        let text = json.to_string();
        assert!(!text.contains(secret.as_base32()));
        assert!(!text.contains("totp_secret"));
        assert_eq!(json["miner_type"], "subsistencia");
        assert_eq!(json["rucon_path"], "subsistencia/rucon/r.pdf");
        assert!(json.get("exploitation_contract_path").is_none());
        assert!(json.get("phone_number").is_none());
        assert!(json["id_front_path"].is_null());
    }
}

//! Value Object Module

pub mod document_policy;
pub mod document_role;
pub mod email;
pub mod id_number;
pub mod miner_category;
pub mod person_name;
pub mod totp_secret;
pub mod uploaded_document;

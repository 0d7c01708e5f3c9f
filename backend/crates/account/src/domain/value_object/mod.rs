//! Value Object Module

pub mod firebase_uid;
pub mod phone_number;

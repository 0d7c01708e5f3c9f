//! Firebase UID Value Object
//!
//! Opaque identifier issued by the external identity provider.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AccountError, AccountResult};

const FIREBASE_UID_MAX_LENGTH: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FirebaseUid(String);

impl FirebaseUid {
    /// `None` for a missing or blank UID
    pub fn parse_optional(raw: Option<String>) -> AccountResult<Option<Self>> {
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(uid) => Self::new(uid).map(Some),
        }
    }

    pub fn new(raw: &str) -> AccountResult<Self> {
        let uid = raw.trim();
        if uid.is_empty() {
            return Err(AccountError::InvalidFirebaseUid("cannot be empty".to_string()));
        }
        if uid.len() > FIREBASE_UID_MAX_LENGTH {
            return Err(AccountError::InvalidFirebaseUid(format!(
                "must be at most {} bytes",
                FIREBASE_UID_MAX_LENGTH
            )));
        }
        if !uid.chars().all(|c| c.is_ascii_graphic()) {
            return Err(AccountError::InvalidFirebaseUid(
                "must be printable ASCII".to_string(),
            ));
        }
        Ok(Self(uid.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FirebaseUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_optional() {
        assert_eq!(FirebaseUid::parse_optional(None).unwrap(), None);
        assert_eq!(FirebaseUid::parse_optional(Some("  ".into())).unwrap(), None);
        assert_eq!(
            FirebaseUid::parse_optional(Some(" abcDEF123 ".into()))
                .unwrap()
                .unwrap()
                .as_str(),
            "abcDEF123"
        );
    }

    #[test]
    fn test_rejects_bad_uid() {
        assert!(FirebaseUid::new("has space").is_err());
        assert!(FirebaseUid::new(&"x".repeat(129)).is_err());
    }
}

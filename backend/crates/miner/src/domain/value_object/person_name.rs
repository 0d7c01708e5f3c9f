//! Person Name Value Object
//!
//! Used for both the given name(s) and the last name of a miner.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{MinerError, MinerResult};

const NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonName(String);

impl PersonName {
    /// Trim and collapse inner whitespace runs; `field` names the form field in errors.
    pub fn new(value: impl AsRef<str>, field: &'static str) -> MinerResult<Self> {
        let collapsed = value
            .as_ref()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        if collapsed.is_empty() {
            return Err(MinerError::InvalidField {
                field,
                reason: "cannot be empty".to_string(),
            });
        }
        if collapsed.chars().count() > NAME_MAX_LENGTH {
            return Err(MinerError::InvalidField {
                field,
                reason: format!("must be at most {} characters", NAME_MAX_LENGTH),
            });
        }
        if collapsed.chars().any(char::is_control) {
            return Err(MinerError::InvalidField {
                field,
                reason: "contains control characters".to_string(),
            });
        }

        Ok(Self(collapsed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace() {
        let name = PersonName::new("  José   María ", "full_name").unwrap();
        assert_eq!(name.as_str(), "José María");
    }

    #[test]
    fn test_empty_reports_field() {
        match PersonName::new("   ", "last_name") {
            Err(MinerError::InvalidField { field, .. }) => assert_eq!(field, "last_name"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_too_long() {
        assert!(PersonName::new("a".repeat(101), "full_name").is_err());
        assert!(PersonName::new("a".repeat(100), "full_name").is_ok());
    }
}

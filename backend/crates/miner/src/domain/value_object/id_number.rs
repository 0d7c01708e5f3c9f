//! Government ID Number Value Object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{MinerError, MinerResult};

const ID_NUMBER_MAX_LENGTH: usize = 32;

/// Cédula or other government ID number. Unique per miner.
///
/// Letters are upper-cased; digits, letters, `-` and `.` are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdNumber(String);

impl IdNumber {
    pub fn new(value: impl Into<String>) -> MinerResult<Self> {
        let value = value.into().trim().to_ascii_uppercase();

        if value.is_empty() {
            return Err(invalid("cannot be empty"));
        }
        if value.chars().count() > ID_NUMBER_MAX_LENGTH {
            return Err(invalid(format!(
                "must be at most {} characters",
                ID_NUMBER_MAX_LENGTH
            )));
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
        {
            return Err(invalid("may only contain letters, digits, '-' and '.'"));
        }
        if !value.chars().any(|c| c.is_ascii_alphanumeric()) {
            return Err(invalid("must contain at least one letter or digit"));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn invalid(reason: impl Into<String>) -> MinerError {
    MinerError::InvalidField {
        field: "id_number",
        reason: reason.into(),
    }
}

impl fmt::Display for IdNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

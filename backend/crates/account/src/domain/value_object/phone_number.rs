//! Phone Number Value Object
//!
//! E.164: `+`, a non-zero leading digit, at most 15 digits in total.
//! Spaces, dashes and parentheses typed by the user are dropped.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AccountError, AccountResult};

const E164_MAX_DIGITS: usize = 15;
const E164_MIN_DIGITS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new(raw: impl AsRef<str>) -> AccountResult<Self> {
        let raw = raw.as_ref().trim();
        let Some(rest) = raw.strip_prefix('+') else {
            return Err(AccountError::InvalidPhoneNumber(
                "must start with + and a country code".to_string(),
            ));
        };

        let mut digits = String::with_capacity(E164_MAX_DIGITS);
        for c in rest.chars() {
            match c {
                '0'..='9' => digits.push(c),
                ' ' | '-' | '(' | ')' => {}
                _ => {
                    return Err(AccountError::InvalidPhoneNumber(
                        "may only contain digits after +".to_string(),
                    ));
                }
            }
        }

        if digits.starts_with('0') {
            return Err(AccountError::InvalidPhoneNumber(
                "country code cannot start with 0".to_string(),
            ));
        }
        if !(E164_MIN_DIGITS..=E164_MAX_DIGITS).contains(&digits.len()) {
            return Err(AccountError::InvalidPhoneNumber(format!(
                "must have {} to {} digits",
                E164_MIN_DIGITS, E164_MAX_DIGITS
            )));
        }

        Ok(Self(format!("+{}", digits)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_numbers() {
        assert_eq!(PhoneNumber::new("+573001234567").unwrap().as_str(), "+573001234567");
        assert_eq!(
            PhoneNumber::new(" +57 (300) 123-4567 ").unwrap().as_str(),
            "+573001234567"
        );
        assert!(PhoneNumber::new("+14155552671").is_ok());
    }

    #[test]
    fn test_invalid_numbers() {
        for bad in [
            "",
            "3001234567",
            "+",
            "+0573001234567",
            "+57300abc4567",
            "+1234567",
            "+1234567890123456",
        ] {
            assert!(
                matches!(PhoneNumber::new(bad), Err(AccountError::InvalidPhoneNumber(_))),
                "accepted {bad:?}"
            );
        }
    }
}

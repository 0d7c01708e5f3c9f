//! Application Configuration

use platform::password::PasswordPolicy;

/// Account application configuration
#[derive(Debug, Clone, Default)]
pub struct AccountConfig {
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Length bounds for new passwords
    pub password_policy: PasswordPolicy,
}

impl AccountConfig {
    /// Set the pepper; an empty value disables it
    pub fn with_pepper(mut self, pepper: impl Into<Vec<u8>>) -> Self {
        let pepper = pepper.into();
        self.password_pepper = (!pepper.is_empty()).then_some(pepper);
        self
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_pepper() {
        assert_eq!(AccountConfig::default().with_pepper("").pepper(), None);
        assert_eq!(
            AccountConfig::default().with_pepper("spice").pepper(),
            Some(&b"spice"[..])
        );
        assert_eq!(AccountConfig::default().password_policy.min_length, 6);
    }
}

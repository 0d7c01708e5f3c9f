//! TOTP Secret Value Object
//!
//! RFC 6238 credential issued to each miner at registration.
//! Google Authenticator compatible: SHA-1, 6 digits, 30 second step,
//! one step of tolerance either side when checking.

use chrono::{DateTime, Utc};
use std::fmt;
use totp_rs::{Algorithm, Secret, TOTP};

use crate::error::{MinerError, MinerResult};

const TOTP_DIGITS: usize = 6;
const TOTP_STEP: u64 = 30;
const TOTP_SKEW: u8 = 1;
/// 160-bit secret, as recommended by RFC 4226
pub const TOTP_SECRET_BYTES: usize = 20;

/// Parameters always written into the provisioning URL, even when the
/// authenticator default would make them redundant.
const EXPLICIT_URL_PARAMS: [(&str, &str); 3] =
    [("algorithm", "SHA1"), ("digits", "6"), ("period", "30")];

/// Everything an authenticator app needs to enrol the credential
#[derive(Debug, Clone)]
pub struct TotpProvisioning {
    /// `otpauth://totp/...` URL
    pub url: String,
    /// QR code of `url` as base64-encoded PNG
    pub qr_code_base64: String,
}

/// Base32-encoded TOTP secret
#[derive(Clone, PartialEq, Eq)]
pub struct TotpSecret {
    secret_base32: String,
}

impl TotpSecret {
    /// Generate a new random secret
    pub fn generate() -> Self {
        Self::from_bytes(platform::crypto::random_bytes(TOTP_SECRET_BYTES))
    }

    /// Wrap raw secret bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            secret_base32: Secret::Raw(bytes).to_encoded().to_string(),
        }
    }

    /// Create from a base32-encoded string (from database)
    pub fn from_base32(secret: impl Into<String>) -> MinerResult<Self> {
        let secret_base32 = secret.into();
        Secret::Encoded(secret_base32.clone())
            .to_bytes()
            .map_err(|e| MinerError::Internal(format!("Stored TOTP secret is invalid: {:?}", e)))?;
        Ok(Self { secret_base32 })
    }

    /// Base32 form for storage
    pub fn as_base32(&self) -> &str {
        &self.secret_base32
    }

    fn to_totp(&self, issuer: &str, account_name: &str) -> MinerResult<TOTP> {
        let bytes = Secret::Encoded(self.secret_base32.clone())
            .to_bytes()
            .map_err(|e| MinerError::CredentialGeneration(format!("invalid secret: {:?}", e)))?;

        TOTP::new(
            Algorithm::SHA1,
            TOTP_DIGITS,
            TOTP_SKEW,
            TOTP_STEP,
            bytes,
            Some(issuer.to_string()),
            account_name.to_string(),
        )
        .map_err(|e| MinerError::CredentialGeneration(format!("{:?}", e)))
    }

    /// 6-digit code for the step containing `at`
    pub fn code_at(&self, issuer: &str, account_name: &str, at: DateTime<Utc>) -> MinerResult<String> {
        let totp = self.to_totp(issuer, account_name)?;
        Ok(totp.generate(unix_seconds(at)?))
    }

    /// Check `code` against the step containing `at` and its two neighbours
    pub fn verify_at(
        &self,
        code: &str,
        issuer: &str,
        account_name: &str,
        at: DateTime<Utc>,
    ) -> MinerResult<bool> {
        let code = code.trim();
        if code.len() != TOTP_DIGITS || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(false);
        }
        let totp = self.to_totp(issuer, account_name)?;
        Ok(totp.check(code, unix_seconds(at)?))
    }

    /// Provisioning URL and its QR code
    pub fn provisioning(&self, issuer: &str, account_name: &str) -> MinerResult<TotpProvisioning> {
        let totp = self.to_totp(issuer, account_name)?;

        let mut url = totp.get_url();
        for (key, value) in EXPLICIT_URL_PARAMS {
            if !has_query_param(&url, key) {
                url.push('&');
                url.push_str(key);
                url.push('=');
                url.push_str(value);
            }
        }

        let qr_code_base64 = totp
            .get_qr_base64()
            .map_err(|e| MinerError::CredentialGeneration(format!("QR rendering failed: {}", e)))?;

        Ok(TotpProvisioning {
            url,
            qr_code_base64,
        })
    }

    /// Seconds until the step containing `at` ends
    pub fn seconds_remaining(at: DateTime<Utc>) -> u64 {
        let secs = at.timestamp().max(0) as u64;
        TOTP_STEP - secs % TOTP_STEP
    }
}

fn unix_seconds(at: DateTime<Utc>) -> MinerResult<u64> {
    u64::try_from(at.timestamp())
        .map_err(|_| MinerError::CredentialGeneration("timestamp before Unix epoch".to_string()))
}

fn has_query_param(url: &str, key: &str) -> bool {
    let Some((_, query)) = url.split_once('?') else {
        return false;
    };
    query
        .split('&')
        .any(|pair| pair.split('=').next() == Some(key))
}

impl fmt::Debug for TotpSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TotpSecret")
            .field("secret_base32", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const ISSUER: &str = "Batea Fintech";
    const ACCOUNT: &str = "minero@example.com";

    fn rfc6238_secret() -> TotpSecret {
        TotpSecret::from_bytes(b"12345678901234567890".to_vec())
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_rfc6238_vectors() {
        let secret = rfc6238_secret();
        assert_eq!(secret.code_at(ISSUER, ACCOUNT, at(59)).unwrap(), "287082");
        assert_eq!(
            secret.code_at(ISSUER, ACCOUNT, at(1_111_111_109)).unwrap(),
            "081804"
        );
    }

    #[test]
    fn test_generate_length() {
        let secret = TotpSecret::generate();
        let bytes = Secret::Encoded(secret.as_base32().to_string())
            .to_bytes()
            .unwrap();
        assert_eq!(bytes.len(), TOTP_SECRET_BYTES);
        assert_ne!(secret, TotpSecret::generate());
    }

    #[test]
    fn test_verify_window() {
        let secret = TotpSecret::generate();
        let t = at(1_700_000_010);
        let code = secret.code_at(ISSUER, ACCOUNT, t).unwrap();

        assert!(secret.verify_at(&code, ISSUER, ACCOUNT, t).unwrap());
        assert!(secret.verify_at(&code, ISSUER, ACCOUNT, t + chrono::Duration::seconds(30)).unwrap());
        assert!(secret.verify_at(&code, ISSUER, ACCOUNT, t - chrono::Duration::seconds(30)).unwrap());
        assert!(!secret.verify_at(&code, ISSUER, ACCOUNT, t + chrono::Duration::seconds(90)).unwrap());
        assert!(!secret.verify_at(&code, ISSUER, ACCOUNT, t - chrono::Duration::seconds(90)).unwrap());
    }

    #[test]
    fn test_verify_rejects_malformed_codes() {
        let secret = rfc6238_secret();
        let t = at(59);
        assert!(!secret.verify_at("28708", ISSUER, ACCOUNT, t).unwrap());
        assert!(!secret.verify_at("2870821", ISSUER, ACCOUNT, t).unwrap());
        assert!(!secret.verify_at("28708a", ISSUER, ACCOUNT, t).unwrap());
        assert!(secret.verify_at(" 287082 ", ISSUER, ACCOUNT, t).unwrap());
    }

    #[test]
    fn test_same_step_same_code() {
        let secret = TotpSecret::generate();
        let a = secret.code_at(ISSUER, ACCOUNT, at(1_700_000_010)).unwrap();
        let b = secret.code_at(ISSUER, ACCOUNT, at(1_700_000_039)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 6);
    }

    #[test]
    fn test_provisioning_url() {
        let secret = rfc6238_secret();
        let p = secret.provisioning(ISSUER, ACCOUNT).unwrap();

        assert!(p.url.starts_with("otpauth://totp/"));
        assert!(p.url.contains(&format!("secret={}", secret.as_base32())));
        assert!(p.url.contains("issuer=Batea%20Fintech"));
        assert!(p.url.contains("algorithm=SHA1"));
        assert!(p.url.contains("digits=6"));
        assert!(p.url.contains("period=30"));
        assert_eq!(p.url.matches("digits=").count(), 1);
        assert!(!p.qr_code_base64.is_empty());
    }

    #[test]
    fn test_issuer_with_colon_fails() {
        let secret = TotpSecret::generate();
        assert!(matches!(
            secret.provisioning("Bad:Issuer", ACCOUNT),
            Err(MinerError::CredentialGeneration(_))
        ));
    }

    #[test]
    fn test_from_base32_roundtrip() {
        let secret = TotpSecret::generate();
        let restored = TotpSecret::from_base32(secret.as_base32()).unwrap();
        assert_eq!(secret, restored);
        assert!(TotpSecret::from_base32("not base32 !!").is_err());
    }

    #[test]
    fn test_seconds_remaining() {
        assert_eq!(TotpSecret::seconds_remaining(at(60)), 30);
        assert_eq!(TotpSecret::seconds_remaining(at(89)), 1);
    }

    #[test]
    fn test_debug_redacted() {
        let secret = TotpSecret::generate();
        let out = format!("{:?}", secret);
        assert!(!out.contains(secret.as_base32()));
    }
}

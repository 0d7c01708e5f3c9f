//! User Entity

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;

use crate::domain::value_object::{firebase_uid::FirebaseUid, phone_number::PhoneNumber};
use crate::error::{AccountError, AccountResult};

/// How a user proves their identity. At least one side is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredential {
    password_hash: Option<HashedPassword>,
    firebase_uid: Option<FirebaseUid>,
}

impl UserCredential {
    pub fn new(
        password_hash: Option<HashedPassword>,
        firebase_uid: Option<FirebaseUid>,
    ) -> AccountResult<Self> {
        if password_hash.is_none() && firebase_uid.is_none() {
            return Err(AccountError::PasswordRequired);
        }
        Ok(Self {
            password_hash,
            firebase_uid,
        })
    }

    pub fn password_hash(&self) -> Option<&HashedPassword> {
        self.password_hash.as_ref()
    }

    pub fn firebase_uid(&self) -> Option<&FirebaseUid> {
        self.firebase_uid.as_ref()
    }
}

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub phone_number: PhoneNumber,
    pub credential: UserCredential,
    /// Phone ownership confirmed (by SMS or the identity provider)
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(
        phone_number: PhoneNumber,
        credential: UserCredential,
        is_verified: bool,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: UserId::new(),
            phone_number,
            credential,
            is_verified,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_needs_one_side() {
        assert!(matches!(
            UserCredential::new(None, None),
            Err(AccountError::PasswordRequired)
        ));
        let uid = FirebaseUid::new("uid-1").unwrap();
        let credential = UserCredential::new(None, Some(uid.clone())).unwrap();
        assert_eq!(credential.firebase_uid(), Some(&uid));
        assert!(credential.password_hash().is_none());
    }
}

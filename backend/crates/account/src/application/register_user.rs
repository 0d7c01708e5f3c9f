//! Register User Use Case
//!
//! Creates a user identified by phone number. A password is mandatory
//! unless the user is linked to an external identity.

use chrono::{DateTime, Utc};
use platform::password::ClearTextPassword;
use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::domain::entity::user::{User, UserCredential};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{firebase_uid::FirebaseUid, phone_number::PhoneNumber};
use crate::error::{AccountError, AccountResult};

/// Register user input
#[derive(Default)]
pub struct RegisterUserInput {
    pub phone_number: String,
    pub password: Option<String>,
    pub firebase_uid: Option<String>,
    pub is_verified: bool,
}

/// Register user use case
pub struct RegisterUserUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AccountConfig>,
}

impl<R> RegisterUserUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AccountConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: RegisterUserInput) -> AccountResult<User> {
        self.execute_at(input, Utc::now()).await
    }

    pub async fn execute_at(
        &self,
        input: RegisterUserInput,
        now: DateTime<Utc>,
    ) -> AccountResult<User> {
        let phone_number = PhoneNumber::new(&input.phone_number)?;
        let firebase_uid = FirebaseUid::parse_optional(input.firebase_uid)?;

        if self.repo.find_by_phone(&phone_number).await?.is_some() {
            return Err(AccountError::PhoneNumberTaken);
        }

        // A password sent alongside an external identity is still kept
        let password_hash = match input.password.filter(|p| !p.is_empty()) {
            Some(raw) => {
                let password = ClearTextPassword::new(raw, self.config.password_policy)?;
                Some(password.hash(self.config.pepper())?)
            }
            None => None,
        };
        let credential = UserCredential::new(password_hash, firebase_uid)?;

        let user = User::new(phone_number, credential, input.is_verified, now);
        self.repo.create(&user).await?;

        tracing::info!(
            user_id = %user.id,
            external_identity = user.credential.firebase_uid().is_some(),
            "User registered"
        );

        Ok(user)
    }
}

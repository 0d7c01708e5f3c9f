//! Repository Traits

use crate::domain::entity::user::User;
use crate::domain::value_object::phone_number::PhoneNumber;
use crate::error::AccountResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user.
    ///
    /// A clash on phone number or firebase UID yields the matching
    /// `AccountError::*Taken` variant.
    async fn create(&self, user: &User) -> AccountResult<()>;

    /// Find a live user by phone number
    async fn find_by_phone(&self, phone: &PhoneNumber) -> AccountResult<Option<User>>;
}

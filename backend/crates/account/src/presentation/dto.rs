//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::RegisterUserInput;
use crate::domain::entity::user::User;

/// Registration request
#[derive(Deserialize)]
pub struct RegisterUserRequest {
    pub phone_number: String,
    /// Required unless `firebase_uid` is set
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub firebase_uid: Option<String>,
    /// Set by clients that verified the phone with the identity provider
    #[serde(default)]
    pub is_verified: bool,
}

impl From<RegisterUserRequest> for RegisterUserInput {
    fn from(req: RegisterUserRequest) -> Self {
        Self {
            phone_number: req.phone_number,
            password: req.password,
            firebase_uid: req.firebase_uid,
            is_verified: req.is_verified,
        }
    }
}

/// User as returned by the API
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub phone_number: String,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: *user.id.as_uuid(),
            phone_number: user.phone_number.to_string(),
            is_verified: user.is_verified,
            created_at: user.created_at,
        }
    }
}

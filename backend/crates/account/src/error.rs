//! Account Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::{PasswordHashError, PasswordPolicyError};
use thiserror::Error;

/// Account-specific result type alias
pub type AccountResult<T> = Result<T, AccountError>;

/// Account-specific error variants
#[derive(Debug, Error)]
pub enum AccountError {
    /// Phone number is not in E.164 form
    #[error("Invalid phone number: {0}")]
    InvalidPhoneNumber(String),

    /// Password violates the registration policy
    #[error("{0}")]
    PasswordPolicy(#[from] PasswordPolicyError),

    /// Neither a password nor an external identity was supplied
    #[error("A password is required when no external identity is linked")]
    PasswordRequired,

    /// External identity UID is malformed
    #[error("Invalid firebase_uid: {0}")]
    InvalidFirebaseUid(String),

    /// Phone number already registered
    #[error("A user with this phone number already exists")]
    PhoneNumberTaken,

    /// External identity already linked to another user
    #[error("This external identity is already linked to a user")]
    FirebaseUidTaken,

    /// Password hashing failed
    #[error("Password hashing failed: {0}")]
    PasswordHash(#[from] PasswordHashError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Malformed request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccountError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::InvalidPhoneNumber(_)
            | AccountError::PasswordPolicy(_)
            | AccountError::PasswordRequired
            | AccountError::InvalidFirebaseUid(_)
            | AccountError::BadRequest(_) => ErrorKind::BadRequest,
            AccountError::PhoneNumberTaken | AccountError::FirebaseUidTaken => ErrorKind::Conflict,
            AccountError::PasswordHash(_)
            | AccountError::Database(_)
            | AccountError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            AccountError::PasswordPolicy(_) | AccountError::PasswordRequired => {
                AppError::new(self.kind(), self.to_string())
                    .with_action("Choose a password of 6 to 32 characters")
            }
            AccountError::PhoneNumberTaken => AppError::new(self.kind(), self.to_string())
                .with_action("Sign in or use a different phone number"),
            AccountError::PasswordHash(_)
            | AccountError::Database(_)
            | AccountError::Internal(_) => AppError::internal("Internal server error"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AccountError::Database(e) => {
                tracing::error!(error = %e, "Account database error");
            }
            AccountError::PasswordHash(e) => {
                tracing::error!(error = %e, "Password hashing error");
            }
            AccountError::Internal(msg) => {
                tracing::error!(message = %msg, "Account internal error");
            }
            AccountError::PhoneNumberTaken | AccountError::FirebaseUidTaken => {
                tracing::warn!(error = %self, "Duplicate user registration");
            }
            _ => {
                tracing::debug!(error = %self, "Account error");
            }
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AccountError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AccountError::BadRequest(err.message().to_string()),
            _ => AccountError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AccountError::InvalidPhoneNumber("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AccountError::PasswordPolicy(PasswordPolicyError::TooShort { min: 6, actual: 3 })
                .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AccountError::PhoneNumberTaken.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AccountError::Database(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_detail_hidden() {
        let err = AccountError::Internal("pool exploded".into()).to_app_error();
        assert_eq!(err.message(), "Internal server error");
    }
}

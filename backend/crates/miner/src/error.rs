//! Miner Error Types
//!
//! Registry-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::services::DocumentViolation;

/// Miner-specific result type alias
pub type MinerResult<T> = Result<T, MinerError>;

/// Miner-specific error variants
#[derive(Debug, Error)]
pub enum MinerError {
    /// Category string is not one of the known categories
    #[error("Invalid miner category: {0}")]
    InvalidCategory(String),

    /// Identity field failed validation
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// One or more documents failed validation
    #[error("Document validation failed ({} violation(s))", .0.len())]
    Validation(Vec<DocumentViolation>),

    /// Writing or removing a document failed
    #[error("Document storage failed: {0}")]
    StorageIo(#[from] std::io::Error),

    /// TOTP secret, code or provisioning URL could not be produced
    #[error("Credential generation failed: {0}")]
    CredentialGeneration(String),

    /// Email or ID number already registered
    #[error("A miner with this {field} is already registered")]
    DuplicateMiner { field: String },

    /// Database error
    #[error("Persistence failed: {0}")]
    Persistence(#[from] sqlx::Error),

    /// Miner not found (or soft-deleted)
    #[error("Miner not found")]
    MinerNotFound,

    /// Record exists but carries no TOTP secret
    #[error("Miner has no TOTP credential configured")]
    NoCredentialConfigured,

    /// Code does not match the current step or its neighbours
    #[error("Invalid or expired TOTP code")]
    InvalidOrExpiredCode,

    /// Malformed request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Request body exceeds the configured ceiling
    #[error("Request body too large")]
    PayloadTooLarge,

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MinerError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            MinerError::InvalidCategory(_)
            | MinerError::InvalidField { .. }
            | MinerError::BadRequest(_) => ErrorKind::BadRequest,
            MinerError::Validation(_) => ErrorKind::UnprocessableEntity,
            MinerError::StorageIo(e) if e.kind() == std::io::ErrorKind::InvalidInput => {
                ErrorKind::BadRequest
            }
            MinerError::DuplicateMiner { .. } => ErrorKind::Conflict,
            MinerError::MinerNotFound => ErrorKind::NotFound,
            MinerError::NoCredentialConfigured => ErrorKind::PreconditionFailed,
            MinerError::InvalidOrExpiredCode => ErrorKind::Unauthorized,
            MinerError::PayloadTooLarge => ErrorKind::PayloadTooLarge,
            MinerError::StorageIo(_)
            | MinerError::CredentialGeneration(_)
            | MinerError::Persistence(_)
            | MinerError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Server-side failures keep their detail in the logs only.
    pub fn to_app_error(&self) -> AppError {
        match self {
            MinerError::Validation(violations) => {
                AppError::new(self.kind(), self.to_string())
                    .with_action("Correct the listed documents and submit again")
                    .with_details(serde_json::to_value(violations).unwrap_or_default())
            }
            MinerError::DuplicateMiner { .. } => AppError::new(self.kind(), self.to_string())
                .with_action("Use a different email or ID number"),
            MinerError::PayloadTooLarge => AppError::new(self.kind(), self.to_string())
                .with_action("Reduce the size of the attached documents"),
            MinerError::StorageIo(_) if self.kind() == ErrorKind::BadRequest => {
                AppError::new(self.kind(), "Invalid document file name")
            }
            MinerError::StorageIo(_) => AppError::internal("Document storage failed"),
            MinerError::CredentialGeneration(_) => AppError::internal("Credential generation failed"),
            MinerError::Persistence(_) | MinerError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            MinerError::Persistence(e) => {
                tracing::error!(error = %e, "Miner persistence error");
            }
            MinerError::StorageIo(e) => {
                tracing::error!(error = %e, "Miner document storage error");
            }
            MinerError::CredentialGeneration(msg) => {
                tracing::error!(message = %msg, "Miner credential generation error");
            }
            MinerError::Internal(msg) => {
                tracing::error!(message = %msg, "Miner internal error");
            }
            MinerError::DuplicateMiner { field } => {
                tracing::warn!(field = %field, "Duplicate miner registration");
            }
            MinerError::InvalidOrExpiredCode => {
                tracing::warn!("Invalid TOTP code submitted");
            }
            _ => {
                tracing::debug!(error = %self, "Miner error");
            }
        }
    }
}

impl IntoResponse for MinerError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for MinerError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => MinerError::BadRequest(err.message().to_string()),
            ErrorKind::NotFound => MinerError::MinerNotFound,
            _ => MinerError::Internal(err.to_string()),
        }
    }
}

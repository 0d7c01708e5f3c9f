//! Error conversions and HTTP rendering
//!
//! Provides conversions from I/O, JSON and database errors to [`AppError`] and renders
//! [`AppError`] as an RFC 7807 problem document.

use super::app_error::AppError;

// ============================================================================
// Standard conversions
// ============================================================================

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => AppError::not_found("File not found"),
            std::io::ErrorKind::PermissionDenied => AppError::forbidden("Permission denied"),
            std::io::ErrorKind::InvalidInput | std::io::ErrorKind::InvalidData => {
                AppError::bad_request("Invalid input")
            }
            _ => AppError::internal("I/O error"),
        }
        .with_source(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            AppError::internal("JSON I/O error").with_source(err)
        } else {
            AppError::bad_request(format!("Invalid JSON: {}", err)).with_source(err)
        }
    }
}

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::not_found("Record not found").with_source(err),
            sqlx::Error::PoolTimedOut => {
                AppError::service_unavailable("Database connection pool exhausted").with_source(err)
            }
            sqlx::Error::Database(db_err) => {
                // https://www.postgresql.org/docs/current/errcodes-appendix.html
                let app_err = match db_err.code().as_deref() {
                    Some("23505") => AppError::conflict("Duplicate key value"),
                    Some("23503") => AppError::conflict("Foreign key violation"),
                    Some("23502") => AppError::bad_request("Required field is null"),
                    Some("23514") => AppError::bad_request("Check constraint violation"),
                    Some("42501") => AppError::forbidden("Insufficient privilege"),
                    Some(code) if code.starts_with("53") || code.starts_with("57") => {
                        AppError::service_unavailable("Database unavailable")
                    }
                    _ => AppError::internal("Database error"),
                };
                app_err.with_source(err)
            }
            sqlx::Error::Io(_) => {
                AppError::service_unavailable("Database connection error").with_source(err)
            }
            _ => AppError::internal("Database error").with_source(err),
        }
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let mut body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
            "action": self.action(),
        });
        if let (Some(details), Some(obj)) = (self.details(), body.as_object_mut()) {
            obj.insert("errors".to_string(), details.clone());
        }

        (status, Json(body)).into_response()
    }
}


#[cfg(test)]
mod std_tests {
    use super::*;
    use crate::error::kind::ErrorKind;

    #[test]
    fn test_io_error_kinds() {
        let err = AppError::from(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "bad path",
        ));
        assert_eq!(err.kind(), ErrorKind::BadRequest);

        let err = AppError::from(std::io::Error::other("disk full"));
        assert_eq!(err.kind(), ErrorKind::InternalServerError);
    }

    #[test]
    fn test_json_syntax_is_bad_request() {
        let err = AppError::from(serde_json::from_str::<serde_json::Value>("{").unwrap_err());
        assert_eq!(err.status_code(), 400);
        assert!(err.message().starts_with("Invalid JSON"));
    }
}

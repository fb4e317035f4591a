/// Error types for QR Service
///
/// Every failure the service can hit (encoding, upload, bucket bootstrap)
/// is reported to clients as a 500 carrying the underlying message in a
/// `{"detail": ...}` body.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

use crate::models::ErrorBody;

/// Result type for qr-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// QR rendering or PNG encoding failed
    #[error("{0}")]
    Encoding(String),

    /// Object store call failed
    #[error("{0}")]
    Storage(String),

    /// Invalid configuration
    #[error("{0}")]
    Config(String),

    /// Internal server error
    #[error("{0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            detail: self.to_string(),
        })
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("Background task failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_variant_is_server_error() {
        let errors = [
            AppError::Encoding("data too long".into()),
            AppError::Storage("NoSuchBucket".into()),
            AppError::Config("bad backend".into()),
            AppError::Internal("boom".into()),
        ];

        for err in errors {
            assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn test_display_is_bare_message() {
        let err = AppError::Storage("connection reset by peer".into());
        assert_eq!(err.to_string(), "connection reset by peer");
    }
}

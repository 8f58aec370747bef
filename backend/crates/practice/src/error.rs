//! Practice Error Types
//!
//! This module provides practice-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::generator::GenerationError;

/// Practice-specific result type alias
pub type PracticeResult<T> = Result<T, PracticeError>;

/// Practice-specific error variants
///
/// These are domain-specific errors that map to appropriate HTTP status codes
/// and can be converted to `AppError` for unified error handling.
#[derive(Debug, Error)]
pub enum PracticeError {
    /// Session not found for this owner
    #[error("Session not found")]
    SessionNotFound,

    /// A requested source document does not exist
    #[error("Source content not found")]
    ContentNotFound,

    /// A session was requested over an empty document set
    #[error("No source content provided")]
    EmptyContent,

    /// Requested question limit is not positive or exceeds the maximum
    #[error("Limit must be between 1 and the configured maximum")]
    InvalidLimit,

    /// Missing required header (e.g., X-User-Id)
    #[error("Missing required header: {0}")]
    MissingHeader(String),

    /// Upstream generation failed
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PracticeError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            PracticeError::SessionNotFound | PracticeError::ContentNotFound => {
                StatusCode::NOT_FOUND
            }
            PracticeError::EmptyContent
            | PracticeError::InvalidLimit
            | PracticeError::MissingHeader(_) => StatusCode::BAD_REQUEST,
            PracticeError::Generation(GenerationError::RateLimited) => {
                StatusCode::TOO_MANY_REQUESTS
            }
            PracticeError::Generation(_) => StatusCode::SERVICE_UNAVAILABLE,
            PracticeError::Database(_) | PracticeError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PracticeError::SessionNotFound | PracticeError::ContentNotFound => ErrorKind::NotFound,
            PracticeError::EmptyContent
            | PracticeError::InvalidLimit
            | PracticeError::MissingHeader(_) => ErrorKind::BadRequest,
            PracticeError::Generation(GenerationError::RateLimited) => ErrorKind::TooManyRequests,
            PracticeError::Generation(_) => ErrorKind::ServiceUnavailable,
            PracticeError::Database(_) | PracticeError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            PracticeError::Database(e) => {
                tracing::error!(error = %e, "Practice database error");
            }
            PracticeError::Internal(msg) => {
                tracing::error!(message = %msg, "Practice internal error");
            }
            PracticeError::Generation(e) => {
                tracing::warn!(error = %e, "Upstream generation failed");
            }
            _ => {
                tracing::debug!(error = %self, "Practice error");
            }
        }
    }
}

impl From<PracticeError> for AppError {
    fn from(err: PracticeError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        AppError::new(kind, message)
    }
}

impl IntoResponse for PracticeError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status_code();
        // Return empty body for security (don't leak details)
        (status, ()).into_response()
    }
}

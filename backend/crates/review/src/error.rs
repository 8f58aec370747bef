//! Review Error Types
//!
//! This module provides review-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Review-specific result type alias
pub type ReviewResult<T> = Result<T, ReviewError>;

/// Review-specific error variants
///
/// These are domain-specific errors that map to appropriate HTTP status codes
/// and can be converted to `AppError` for unified error handling.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// Card not found for this owner
    #[error("Card not found")]
    CardNotFound,

    /// Quality rating outside the 0-5 range
    #[error("Quality rating out of range: {0}")]
    InvalidQuality(u8),

    /// Requested due-card limit is not positive
    #[error("Limit must be at least 1")]
    InvalidLimit,

    /// Missing required header (e.g., X-User-Id)
    #[error("Missing required header: {0}")]
    MissingHeader(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ReviewError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ReviewError::CardNotFound => StatusCode::NOT_FOUND,
            ReviewError::InvalidQuality(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ReviewError::InvalidLimit | ReviewError::MissingHeader(_) => StatusCode::BAD_REQUEST,
            ReviewError::Database(_) | ReviewError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReviewError::CardNotFound => ErrorKind::NotFound,
            ReviewError::InvalidQuality(_) => ErrorKind::UnprocessableEntity,
            ReviewError::InvalidLimit | ReviewError::MissingHeader(_) => ErrorKind::BadRequest,
            ReviewError::Database(_) | ReviewError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            ReviewError::Database(e) => {
                tracing::error!(error = %e, "Review database error");
            }
            ReviewError::Internal(msg) => {
                tracing::error!(message = %msg, "Review internal error");
            }
            ReviewError::InvalidQuality(quality) => {
                tracing::warn!(quality = quality, "Rejected out-of-range quality rating");
            }
            _ => {
                tracing::debug!(error = %self, "Review error");
            }
        }
    }
}

impl From<ReviewError> for AppError {
    fn from(err: ReviewError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        AppError::new(kind, message)
    }
}

impl IntoResponse for ReviewError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status_code();
        // Return empty body for security (don't leak details)
        (status, ()).into_response()
    }
}

//! Content Error Types
//!
//! Content-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Content-specific result type alias
pub type ContentResult<T> = Result<T, ContentError>;

/// Content-specific error variants
#[derive(Debug, Error)]
pub enum ContentError {
    /// Post absent, unpublished for this caller, or deleted
    #[error("Post not found")]
    PostNotFound,

    /// Tag not found
    #[error("Tag not found")]
    TagNotFound,

    /// Comment not found
    #[error("Comment not found")]
    CommentNotFound,

    /// Caller may not modify this resource
    #[error("Insufficient permissions")]
    Forbidden,

    /// Request payload failed validation; details carry field-level issues
    #[error("Request validation failed")]
    Validation(serde_json::Value),

    /// A kernel-level error (mapped persistence error, mostly)
    #[error(transparent)]
    App(#[from] AppError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ContentError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ContentError::PostNotFound
            | ContentError::TagNotFound
            | ContentError::CommentNotFound => ErrorKind::NotFound,
            ContentError::Forbidden => ErrorKind::Forbidden,
            ContentError::Validation(_) => ErrorKind::Validation,
            ContentError::App(err) => err.kind(),
            ContentError::Database(_) | ContentError::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn into_app_error(self) -> AppError {
        match self {
            ContentError::App(err) => err,
            ContentError::Validation(details) => {
                AppError::validation("Request validation failed").with_details(details)
            }
            ContentError::Database(err) => AppError::from(err),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    fn log(&self) {
        match self {
            ContentError::Database(e) => {
                tracing::error!(error = %e, "Content database error");
            }
            ContentError::Internal(msg) => {
                tracing::error!(message = %msg, "Content internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Content error");
            }
        }
    }
}

impl IntoResponse for ContentError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ContentError::PostNotFound.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ContentError::TagNotFound.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ContentError::Forbidden.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ContentError::Validation(serde_json::json!({})).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ContentError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unique_constraint_passthrough() {
        let err = ContentError::App(AppError::unique_constraint("slug already exists"));
        assert_eq!(err.kind(), ErrorKind::UniqueConstraint);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}

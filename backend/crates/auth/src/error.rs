//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Credential mismatch at login
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Missing, invalid or expired refresh credential.
    /// A normal outcome on first visit, not a fault.
    #[error("Refresh credential is missing or invalid")]
    RefreshInvalid,

    /// Missing, invalid or expired access token on a protected operation
    #[error("Access token is missing or invalid")]
    TokenInvalid,

    /// Authenticated but not allowed
    #[error("Insufficient permissions")]
    Forbidden,

    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// Request payload failed validation; details carry field-level issues
    #[error("Request validation failed")]
    Validation(serde_json::Value),

    /// A kernel-level error (value object validation, mapped persistence error)
    #[error(transparent)]
    App(#[from] AppError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials => ErrorKind::SignIn,
            AuthError::RefreshInvalid | AuthError::TokenInvalid => ErrorKind::Unauthorized,
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Validation(_) => ErrorKind::Validation,
            AuthError::App(err) => err.kind(),
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Convert to AppError
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::App(err) => err,
            AuthError::Validation(details) => {
                AppError::validation("Request validation failed").with_details(details)
            }
            AuthError::Database(err) => AppError::from(err),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            // Expected on every first visit without a session
            AuthError::RefreshInvalid => {
                tracing::debug!("Refresh attempted without a valid credential");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
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
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::RefreshInvalid.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::TokenInvalid.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AuthError::Validation(serde_json::json!({})).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_sign_in_and_refresh_share_the_401_class() {
        // Credential mismatch and refresh failure must look the same to a client
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            AuthError::RefreshInvalid.status_code()
        );
    }

    #[test]
    fn test_app_error_kind_is_preserved() {
        let err = AuthError::App(AppError::unique_constraint("email already exists"));
        assert_eq!(err.kind(), ErrorKind::UniqueConstraint);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_validation_details_survive_conversion() {
        let err = AuthError::Validation(serde_json::json!({"email": "is required"}));
        let app = err.into_app_error();
        assert_eq!(app.kind(), ErrorKind::Validation);
        assert_eq!(
            app.details().unwrap()["email"],
            serde_json::json!("is required")
        );
    }
}

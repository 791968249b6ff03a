//! Client Error Types
//!
//! A closed union over every way a request can fail. Variants are
//! constructed exactly once, at the boundary where the underlying failure
//! is first observed ([`crate::parse`] for responses, [`crate::http`] for
//! the transport); downstream code matches on the variant and never
//! re-inspects the raw failure.

use thiserror::Error;

/// Client-side failure union
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, TLS, ...)
    #[error("network failure: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response without a parseable domain error body
    #[error("http {status}: {message}")]
    Http { status: u16, message: String },

    /// Non-2xx response carrying the platform's domain error shape
    #[error("{kind}: {message}")]
    Domain {
        /// Stable classification derived from the status code
        kind: String,
        status: u16,
        /// Display message per the error-body convention
        message: String,
        /// Field-level issues, when the server sent them
        details: Option<serde_json::Value>,
    },
}

impl ApiError {
    /// HTTP status, when a response was received at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Network(_) => None,
            ApiError::Http { status, .. } | ApiError::Domain { status, .. } => Some(*status),
        }
    }

    /// Routine "no session / bad credentials" response.
    ///
    /// The bootstrap flow treats these as expected outcomes and keeps them
    /// out of user-facing logs.
    pub fn is_auth_failure(&self) -> bool {
        self.status() == Some(401)
    }

    /// Display message for UI surfaces
    pub fn message(&self) -> String {
        match self {
            ApiError::Network(e) => e.to_string(),
            ApiError::Http { message, .. } | ApiError::Domain { message, .. } => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accessor() {
        let err = ApiError::Http {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert!(!err.is_auth_failure());

        let err = ApiError::Domain {
            kind: "SignInError".to_string(),
            status: 401,
            message: "Invalid email or password".to_string(),
            details: None,
        };
        assert!(err.is_auth_failure());
    }

    #[test]
    fn test_display() {
        let err = ApiError::Domain {
            kind: "UniqueConstraintError".to_string(),
            status: 400,
            message: "slug already exists".to_string(),
            details: None,
        };
        assert_eq!(
            err.to_string(),
            "UniqueConstraintError: slug already exists"
        );
    }
}

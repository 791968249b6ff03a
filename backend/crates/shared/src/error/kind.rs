//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum that maps to HTTP status codes.

use serde::Serialize;

/// Closed error taxonomy for the platform.
///
/// Every error surfaced to a client carries one of these kinds. The kind
/// decides both the HTTP status code and the stable error name used in
/// response bodies and client-side matching.
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::NotFound;
/// assert_eq!(kind.status_code(), 404);
/// assert_eq!(kind.as_str(), "NotFoundError");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// 400 - request payload failed schema validation
    Validation,
    /// 400 - create/update collided with a uniqueness constraint
    UniqueConstraint,
    /// 401 - credential mismatch at login
    SignIn,
    /// 401 - missing/invalid/expired credential on a protected operation
    Unauthorized,
    /// 403 - authenticated but not allowed
    Forbidden,
    /// 404 - resource absent or access-scoped away
    NotFound,
    /// 500 - unclassified failure, details never leave the server
    Internal,
    /// 503 - a backing service (the database, usually) is unreachable
    ServiceUnavailable,
}

impl ErrorKind {
    /// HTTP status code for this kind
    #[inline]
    pub const fn status_code(&self) -> u16 {
        match self {
            ErrorKind::Validation | ErrorKind::UniqueConstraint => 400,
            ErrorKind::SignIn | ErrorKind::Unauthorized => 401,
            ErrorKind::Forbidden => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::Internal => 500,
            ErrorKind::ServiceUnavailable => 503,
        }
    }

    /// Stable error name, part of the wire contract
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "ValidationError",
            ErrorKind::UniqueConstraint => "UniqueConstraintError",
            ErrorKind::SignIn => "SignInError",
            ErrorKind::Unauthorized => "UnauthorizedError",
            ErrorKind::Forbidden => "ForbiddenError",
            ErrorKind::NotFound => "NotFoundError",
            ErrorKind::Internal => "InternalServerError",
            ErrorKind::ServiceUnavailable => "ServiceUnavailableError",
        }
    }

    /// Generic message safe to put in a response body for this kind.
    ///
    /// Used for server errors, where the real message must stay in the logs.
    #[inline]
    pub const fn generic_message(&self) -> &'static str {
        match self {
            ErrorKind::ServiceUnavailable => "Service temporarily unavailable",
            _ => "Something went wrong",
        }
    }

    /// 5xx errors. These should be logged with their source.
    #[inline]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// 4xx errors.
    #[inline]
    pub const fn is_client_error(&self) -> bool {
        let code = self.status_code();
        code >= 400 && code < 500
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ErrorKind::Validation.status_code(), 400);
        assert_eq!(ErrorKind::UniqueConstraint.status_code(), 400);
        assert_eq!(ErrorKind::SignIn.status_code(), 401);
        assert_eq!(ErrorKind::Unauthorized.status_code(), 401);
        assert_eq!(ErrorKind::Forbidden.status_code(), 403);
        assert_eq!(ErrorKind::NotFound.status_code(), 404);
        assert_eq!(ErrorKind::Internal.status_code(), 500);
        assert_eq!(ErrorKind::ServiceUnavailable.status_code(), 503);
    }

    #[test]
    fn test_stable_names() {
        assert_eq!(ErrorKind::NotFound.as_str(), "NotFoundError");
        assert_eq!(ErrorKind::SignIn.as_str(), "SignInError");
        assert_eq!(ErrorKind::Validation.as_str(), "ValidationError");
        assert_eq!(ErrorKind::UniqueConstraint.as_str(), "UniqueConstraintError");
    }

    #[test]
    fn test_is_server_error() {
        assert!(!ErrorKind::Validation.is_server_error());
        assert!(!ErrorKind::NotFound.is_server_error());
        assert!(ErrorKind::Internal.is_server_error());
        assert!(ErrorKind::ServiceUnavailable.is_server_error());
    }

    #[test]
    fn test_is_client_error() {
        assert!(ErrorKind::Validation.is_client_error());
        assert!(ErrorKind::SignIn.is_client_error());
        assert!(!ErrorKind::Internal.is_client_error());
    }
}

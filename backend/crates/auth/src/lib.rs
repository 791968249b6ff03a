//! Auth (Token Issuer) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases, token signing, configuration
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, extractors
//!
//! ## Features
//! - Login with email + password, access token in the response body
//! - Refresh credential as an HTTP-only signed cookie scoped to the
//!   refresh endpoint (silent-refresh bootstrap entry point)
//! - Logout with optional server-side refresh revocation
//! - Current-user retrieval for bearer access tokens
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B compliant)
//! - Access tokens HMAC-SHA256 signed, short-lived, verified statelessly
//! - Refresh sessions stored server-side, cookie carries only a signed ID

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::extract::{AuthState, AuthenticatedUser};
pub use presentation::router::{auth_router, users_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgAuthRepository as AuthStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

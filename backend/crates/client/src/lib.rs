//! Session Client - the browser-side auth core, as a library
//!
//! Implements the silent-refresh session pattern against the platform API:
//! - [`session::AuthContext`] - the one-per-page-lifetime state machine
//!   (`Initializing -> Authenticated | Unauthenticated`) with cancellation
//!   checked after every suspension point
//! - [`http::ApiClient`] - authenticated fetch: attaches the bearer token,
//!   interprets nothing
//! - [`parse`] - tolerant error-response parsing (`errors` map,
//!   `errorMessage`, `title`, status-text fallback)
//! - [`error::ApiError`] - the closed failure union, constructed once at
//!   the boundary where a failure is first observed
//!
//! Access tokens live only in memory, never in storage; the refresh
//! credential is an HTTP-only cookie the cookie store handles invisibly.

pub mod dto;
pub mod error;
pub mod http;
pub mod parse;
pub mod session;
pub mod transport;


// Re-exports for convenience
pub use dto::{CurrentUser, LoginSuccess};
pub use error::ApiError;
pub use http::ApiClient;
pub use session::{AuthContext, SessionConfig, SessionState};
pub use transport::{AuthTransport, HttpAuthTransport};

//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{refresh_session::RefreshSession, user::User};
use crate::domain::value_object::{email::Email, public_id::PublicId};
use crate::error::AuthResult;
use kernel::id::UserId;
use uuid::Uuid;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by public ID
    async fn find_by_public_id(&self, public_id: &PublicId) -> AuthResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// List all users, newest first
    async fn list(&self) -> AuthResult<Vec<User>>;
}

/// Refresh session repository trait
#[trait_variant::make(RefreshSessionRepository: Send)]
pub trait LocalRefreshSessionRepository {
    /// Create a new session
    async fn create_session(&self, session: &RefreshSession) -> AuthResult<()>;

    /// Find session by ID
    async fn find_session(&self, session_id: Uuid) -> AuthResult<Option<RefreshSession>>;

    /// Update session (expiry, last-used)
    async fn update_session(&self, session: &RefreshSession) -> AuthResult<()>;

    /// Delete a session (logout revocation)
    async fn delete_session(&self, session_id: Uuid) -> AuthResult<()>;

    /// Clean up expired sessions
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}

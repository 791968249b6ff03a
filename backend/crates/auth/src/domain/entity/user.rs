//! User Entity

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;

use crate::domain::value_object::{
    display_name::DisplayName, email::Email, public_id::PublicId, user_role::UserRole,
};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal ID (UUID v4), never leaves the server
    pub user_id: UserId,
    /// Public ID for API responses
    pub public_id: PublicId,
    /// Login identifier, unique
    pub email: Email,
    /// Argon2id hash, PHC format
    pub password_hash: HashedPassword,
    /// Name shown on posts
    pub display_name: DisplayName,
    /// Authorization role
    pub role: UserRole,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(
        email: Email,
        password_hash: HashedPassword,
        display_name: DisplayName,
        role: UserRole,
    ) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            public_id: PublicId::new(),
            email,
            password_hash,
            display_name,
            role,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this user may manage other users, tags and foreign posts
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::ClearTextPassword;

    fn sample_user(role: UserRole) -> User {
        let password = ClearTextPassword::new("correct horse battery".to_string()).unwrap();
        User::new(
            Email::new("writer@example.com").unwrap(),
            password.hash(None).unwrap(),
            DisplayName::new("Writer").unwrap(),
            role,
        )
    }

    #[test]
    fn test_new_user_timestamps_match() {
        let user = sample_user(UserRole::Author);
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_is_admin() {
        assert!(!sample_user(UserRole::Author).is_admin());
        assert!(sample_user(UserRole::Admin).is_admin());
    }
}

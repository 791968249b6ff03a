use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(i16)]
pub enum UserRole {
    /// Can write and manage their own posts
    #[default]
    Author = 1,
    /// Can manage everything: users, tags, any post, comments
    Admin = 2,
}

impl UserRole {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            UserRole::Author => "author",
            UserRole::Admin => "admin",
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    #[inline]
    pub fn from_id(id: i16) -> Self {
        match id {
            1 => UserRole::Author,
            2 => UserRole::Admin,
            _ => {
                tracing::error!("Invalid UserRole id: {}", id);
                unreachable!("Invalid UserRole id: {}", id)
            }
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "author" => Some(UserRole::Author),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_ids_roundtrip() {
        assert_eq!(UserRole::from_id(UserRole::Author.id()), UserRole::Author);
        assert_eq!(UserRole::from_id(UserRole::Admin.id()), UserRole::Admin);
    }

    #[test]
    fn test_user_role_from_code() {
        assert_eq!(UserRole::from_code("author"), Some(UserRole::Author));
        assert_eq!(UserRole::from_code("admin"), Some(UserRole::Admin));
        assert_eq!(UserRole::from_code("superuser"), None);
    }

    #[test]
    fn test_user_role_checks() {
        assert!(!UserRole::Author.is_admin());
        assert!(UserRole::Admin.is_admin());
    }

    #[test]
    fn test_user_role_display() {
        assert_eq!(UserRole::Author.to_string(), "author");
        assert_eq!(UserRole::Admin.to_string(), "admin");
    }
}

//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response: the access token travels in the body, never as a cookie
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: UserResponse,
    pub access_token: String,
}

// ============================================================================
// Refresh
// ============================================================================

/// Refresh response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
}

// ============================================================================
// Users
// ============================================================================

/// User info response (public shape, no internal IDs)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub role: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.public_id.to_string(),
            email: user.email.to_string(),
            display_name: user.display_name.to_string(),
            role: user.role.code().to_string(),
        }
    }
}

/// Create user request (admin only)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
    /// "author" (default) or "admin"
    pub role: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{
        display_name::DisplayName, email::Email, user_role::UserRole,
    };
    use platform::password::ClearTextPassword;

    fn sample_user() -> User {
        let password = ClearTextPassword::new("correct horse battery".to_string()).unwrap();
        User::new(
            Email::new("writer@example.com").unwrap(),
            password.hash(None).unwrap(),
            DisplayName::new("Writer").unwrap(),
            UserRole::Author,
        )
    }

    #[test]
    fn test_login_response_casing() {
        let user = sample_user();
        let response = LoginResponse {
            user: UserResponse::from(&user),
            access_token: "token".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("accessToken"));
        assert!(json.contains("displayName"));
        assert!(!json.contains("access_token"));
    }

    #[test]
    fn test_refresh_response_casing() {
        let json = serde_json::to_string(&RefreshResponse {
            access_token: "token".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"accessToken":"token"}"#);
    }

    #[test]
    fn test_user_response_uses_public_id() {
        let user = sample_user();
        let response = UserResponse::from(&user);
        assert_eq!(response.id, user.public_id.to_string());
        assert_eq!(response.role, "author");
    }

    #[test]
    fn test_create_user_request_deserialization() {
        let json = r#"{"email":"a@example.com","password":"pw","displayName":"A"}"#;
        let request: CreateUserRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.display_name, "A");
        assert!(request.role.is_none());
    }
}

//! Wire Types
//!
//! Shapes as observed on the wire, camelCase.

use serde::{Deserialize, Serialize};

/// The current user, as `/api/users/me` returns it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub role: String,
}

/// Successful login response body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginSuccess {
    pub user: CurrentUser,
    pub access_token: String,
}

/// Successful refresh response body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshSuccess {
    pub access_token: String,
}

/// Login request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_success_deserialization() {
        let json = r#"{
            "user": {"id":"abc","email":"a@example.com","displayName":"A","role":"author"},
            "accessToken":"token123"
        }"#;

        let success: LoginSuccess = serde_json::from_str(json).unwrap();
        assert_eq!(success.access_token, "token123");
        assert_eq!(success.user.display_name, "A");
    }

    #[test]
    fn test_refresh_success_deserialization() {
        let success: RefreshSuccess =
            serde_json::from_str(r#"{"accessToken":"token123"}"#).unwrap();
        assert_eq!(success.access_token, "token123");
    }

    #[test]
    fn test_login_payload_casing() {
        let json = serde_json::to_string(&LoginPayload {
            email: "a@example.com",
            password: "pw",
        })
        .unwrap();
        assert_eq!(json, r#"{"email":"a@example.com","password":"pw"}"#);
    }
}

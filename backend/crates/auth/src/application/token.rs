//! Token signing and verification
//!
//! Two token shapes, both `payload.signature` with HMAC-SHA256:
//! - access token: base64url(claims JSON), stateless, short-lived;
//! - refresh token: the refresh session's UUID, resolved against the
//!   database on every use.
//!
//! Signatures are domain-separated so one kind can never pass as the other.

use base64::Engine;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::error::{AuthError, AuthResult};

const ACCESS_DOMAIN: &[u8] = b"access.";
const REFRESH_DOMAIN: &[u8] = b"refresh.";

/// Claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Internal user ID
    pub sub: Uuid,
    /// Role id at issue time
    pub role: i16,
    /// Expiration (Unix timestamp ms)
    pub exp_ms: i64,
}

impl AccessClaims {
    pub fn is_expired(&self) -> bool {
        chrono::Utc::now().timestamp_millis() > self.exp_ms
    }
}

/// Issue a short-lived access token for `user`
pub fn issue_access_token(config: &AuthConfig, user: &User) -> AuthResult<String> {
    let claims = AccessClaims {
        sub: *user.user_id.as_uuid(),
        role: user.role.id(),
        exp_ms: chrono::Utc::now().timestamp_millis() + config.access_token_ttl_ms(),
    };

    let payload = serde_json::to_vec(&claims)
        .map_err(|e| AuthError::Internal(format!("Failed to encode claims: {e}")))?;

    Ok(sign(config, ACCESS_DOMAIN, &payload))
}

/// Verify an access token and return its claims
pub fn verify_access_token(config: &AuthConfig, token: &str) -> AuthResult<AccessClaims> {
    let payload = verify(config, ACCESS_DOMAIN, token).ok_or(AuthError::TokenInvalid)?;

    let claims: AccessClaims =
        serde_json::from_slice(&payload).map_err(|_| AuthError::TokenInvalid)?;

    if claims.is_expired() {
        return Err(AuthError::TokenInvalid);
    }

    Ok(claims)
}

/// Sign a refresh session ID into a cookie value
pub fn sign_refresh_token(config: &AuthConfig, session_id: Uuid) -> String {
    sign(config, REFRESH_DOMAIN, session_id.to_string().as_bytes())
}

/// Parse and verify a refresh cookie value into a session ID
pub fn parse_refresh_token(config: &AuthConfig, token: &str) -> AuthResult<Uuid> {
    let payload = verify(config, REFRESH_DOMAIN, token).ok_or(AuthError::RefreshInvalid)?;

    let session_id = std::str::from_utf8(&payload).map_err(|_| AuthError::RefreshInvalid)?;

    session_id.parse().map_err(|_| AuthError::RefreshInvalid)
}

/// Build `base64url(payload).base64url(mac)`
fn sign(config: &AuthConfig, domain: &[u8], payload: &[u8]) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(&config.token_secret)
        .expect("HMAC can take key of any size");
    mac.update(domain);
    mac.update(payload);
    let signature = mac.finalize().into_bytes();

    let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
    format!(
        "{}.{}",
        engine.encode(payload),
        engine.encode(signature)
    )
}

/// Verify the signature and return the raw payload.
///
/// Any malformed input maps to `None`; callers decide which 401 to raise.
fn verify(config: &AuthConfig, domain: &[u8], token: &str) -> Option<Vec<u8>> {
    let (payload_b64, signature_b64) = token.split_once('.')?;

    let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
    let payload = engine.decode(payload_b64).ok()?;
    let signature = engine.decode(signature_b64).ok()?;

    let mut mac = Hmac::<Sha256>::new_from_slice(&config.token_secret)
        .expect("HMAC can take key of any size");
    mac.update(domain);
    mac.update(&payload);

    // Constant-time comparison
    mac.verify_slice(&signature).ok()?;

    Some(payload)
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
    fn test_access_token_roundtrip() {
        let config = AuthConfig::development();
        let user = sample_user();

        let token = issue_access_token(&config, &user).unwrap();
        let claims = verify_access_token(&config, &token).unwrap();

        assert_eq!(claims.sub, *user.user_id.as_uuid());
        assert_eq!(claims.role, UserRole::Author.id());
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_tampered_access_token_rejected() {
        let config = AuthConfig::development();
        let token = issue_access_token(&config, &sample_user()).unwrap();

        let mut tampered = token.clone();
        tampered.replace_range(0..1, if token.starts_with('A') { "B" } else { "A" });

        assert!(matches!(
            verify_access_token(&config, &tampered),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn test_expired_access_token_rejected() {
        let config = AuthConfig {
            access_token_ttl: std::time::Duration::ZERO,
            ..AuthConfig::development()
        };

        let token = issue_access_token(&config, &sample_user()).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));

        assert!(matches!(
            verify_access_token(&config, &token),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let config = AuthConfig::development();
        let other = AuthConfig::development();

        let token = issue_access_token(&config, &sample_user()).unwrap();
        assert!(verify_access_token(&other, &token).is_err());
    }

    #[test]
    fn test_refresh_token_roundtrip() {
        let config = AuthConfig::development();
        let session_id = Uuid::new_v4();

        let token = sign_refresh_token(&config, session_id);
        assert_eq!(parse_refresh_token(&config, &token).unwrap(), session_id);
    }

    #[test]
    fn test_garbage_refresh_token_rejected() {
        let config = AuthConfig::development();
        assert!(parse_refresh_token(&config, "").is_err());
        assert!(parse_refresh_token(&config, "no-dot-here").is_err());
        assert!(parse_refresh_token(&config, "a.b").is_err());
    }

    #[test]
    fn test_domain_separation() {
        // An access token must never validate as a refresh token, even
        // though both are signed with the same secret.
        let config = AuthConfig::development();
        let access = issue_access_token(&config, &sample_user()).unwrap();

        assert!(parse_refresh_token(&config, &access).is_err());
    }
}

//! Refresh Session Entity
//!
//! Server-side half of the refresh credential. The cookie the browser
//! holds carries only this session's signed ID.

use chrono::{DateTime, Duration, Utc};
use kernel::id::UserId;
use uuid::Uuid;

/// Refresh session entity
#[derive(Debug, Clone)]
pub struct RefreshSession {
    /// Session ID (UUID v4)
    pub session_id: Uuid,
    /// Reference to User
    pub user_id: UserId,
    /// Session expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Last time this session minted an access token
    pub last_used_at: DateTime<Utc>,
}

impl RefreshSession {
    /// Create a new refresh session
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(user_id: UserId, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            session_id: Uuid::new_v4(),
            user_id,
            expires_at_ms: (now + ttl).timestamp_millis(),
            created_at: now,
            last_used_at: now,
        }
    }

    /// Check if session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }

    /// Update last-used timestamp
    pub fn touch(&mut self) {
        self.last_used_at = Utc::now();
    }

    /// Slide expiry forward on active use.
    ///
    /// The extension policy is intentionally simple: extend to
    /// (now + ttl) when less than half the TTL remains. Returns whether
    /// the expiry changed, so the caller knows to re-issue the cookie.
    pub fn extend_if_needed(&mut self, ttl: Duration) -> bool {
        let now = Utc::now();

        if self.expires_at_ms < (now + (ttl / 2)).timestamp_millis() {
            self.expires_at_ms = (now + ttl).timestamp_millis();
            return true;
        }

        false
    }

    /// Remaining lifetime in seconds, floored at zero
    pub fn remaining_secs(&self) -> i64 {
        let now_ms = Utc::now().timestamp_millis();
        ((self.expires_at_ms - now_ms) / 1000).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_session_is_not_expired() {
        let session = RefreshSession::new(UserId::new(), Duration::days(7));
        assert!(!session.is_expired());
        assert!(session.remaining_secs() > 0);
    }

    #[test]
    fn test_expired_session() {
        let mut session = RefreshSession::new(UserId::new(), Duration::days(7));
        session.expires_at_ms = Utc::now().timestamp_millis() - 1_000;
        assert!(session.is_expired());
        assert_eq!(session.remaining_secs(), 0);
    }

    #[test]
    fn test_extend_if_needed_only_below_half_ttl() {
        let ttl = Duration::days(7);

        // Fresh session: more than half the TTL remains, no extension
        let mut session = RefreshSession::new(UserId::new(), ttl);
        assert!(!session.extend_if_needed(ttl));

        // Old session: less than half remains, expiry slides forward
        let mut session = RefreshSession::new(UserId::new(), ttl);
        session.expires_at_ms = (Utc::now() + Duration::days(1)).timestamp_millis();
        let before = session.expires_at_ms;
        assert!(session.extend_if_needed(ttl));
        assert!(session.expires_at_ms > before);
    }
}

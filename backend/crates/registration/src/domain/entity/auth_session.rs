//! Auth Session Entity
//!
//! Server-side session record. The cookie only carries a signed reference
//! to `session_id`.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::value_object::user_id::UserId;

/// Auth session entity
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Session ID (UUID v4)
    pub session_id: Uuid,
    /// Reference to User
    pub user_id: UserId,
    /// Session expiration
    pub expires_at: DateTime<Utc>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl AuthSession {
    /// Create a new auth session
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(user_id: UserId, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            session_id: Uuid::new_v4(),
            user_id,
            expires_at: now + ttl,
            created_at: now,
        }
    }

    /// Check if session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Seconds until expiration, zero once expired
    pub fn remaining_secs(&self) -> i64 {
        (self.expires_at - Utc::now()).num_seconds().max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_live() {
        let session = AuthSession::new(UserId::from_string("u1"), Duration::days(30));
        assert!(!session.is_expired());
        assert!(session.remaining_secs() > 29 * 24 * 60 * 60);
        assert_eq!(session.session_id.get_version_num(), 4);
    }

    #[test]
    fn test_session_with_past_expiry_is_expired() {
        let mut session = AuthSession::new(UserId::from_string("u1"), Duration::days(1));
        session.expires_at = Utc::now() - Duration::seconds(1);
        assert!(session.is_expired());
        assert_eq!(session.remaining_secs(), 0);
    }
}

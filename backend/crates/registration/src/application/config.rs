//! Application Configuration
//!
//! Configuration for the registration application layer.

use std::time::Duration;

use platform::crypto;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Lower bound for user id entropy
pub const MIN_USER_ID_ENTROPY_BYTES: usize = 10;

/// Registration application configuration
#[derive(Clone)]
pub struct RegistrationConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Session secret key for HMAC signing (32 bytes)
    pub session_secret: [u8; 32],
    /// Session TTL (30 days)
    pub session_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Random bytes per generated user id
    pub user_id_entropy_bytes: usize,
    /// Where a successful sign-up sends the browser
    pub redirect_location: String,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "auth_session".to_string(),
            session_secret: [0u8; 32],
            session_ttl: Duration::from_secs(30 * 24 * 3600), // 30 days
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            user_id_entropy_bytes: MIN_USER_ID_ENTROPY_BYTES,
            redirect_location: "/".to_string(),
        }
    }
}

impl RegistrationConfig {
    /// Create config with a random session secret
    pub fn with_random_secret() -> Self {
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&crypto::random_bytes(32));
        Self {
            session_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Entropy actually used for user ids, never below the minimum
    pub fn effective_user_id_entropy(&self) -> usize {
        self.user_id_entropy_bytes.max(MIN_USER_ID_ENTROPY_BYTES)
    }

    /// Session TTL in whole seconds, for `Max-Age`
    pub fn session_ttl_secs(&self) -> i64 {
        i64::try_from(self.session_ttl.as_secs()).unwrap_or(i64::MAX)
    }

    /// Session TTL as a chrono duration, for expiry timestamps
    pub fn session_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.session_ttl).unwrap_or(chrono::Duration::MAX)
    }
}

impl std::fmt::Debug for RegistrationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationConfig")
            .field("session_cookie_name", &self.session_cookie_name)
            .field("session_secret", &"[REDACTED]")
            .field("session_ttl", &self.session_ttl)
            .field("cookie_secure", &self.cookie_secure)
            .field("cookie_same_site", &self.cookie_same_site)
            .field("user_id_entropy_bytes", &self.user_id_entropy_bytes)
            .field("redirect_location", &self.redirect_location)
            .finish()
    }
}

//! Random user id generation

use platform::crypto;

use crate::application::config::MIN_USER_ID_ENTROPY_BYTES;
use crate::domain::{services::UserIdGenerator, value_object::user_id::UserId};

/// Base64url-encoded random bytes from the OS CSPRNG
#[derive(Debug, Clone, Copy)]
pub struct RandomUserIdGenerator {
    entropy_bytes: usize,
}

impl RandomUserIdGenerator {
    /// Entropy below the minimum is raised to it
    pub fn new(entropy_bytes: usize) -> Self {
        Self {
            entropy_bytes: entropy_bytes.max(MIN_USER_ID_ENTROPY_BYTES),
        }
    }
}

impl Default for RandomUserIdGenerator {
    fn default() -> Self {
        Self::new(MIN_USER_ID_ENTROPY_BYTES)
    }
}

impl UserIdGenerator for RandomUserIdGenerator {
    fn generate(&self) -> UserId {
        UserId::from_string(crypto::to_base64url(&crypto::random_bytes(self.entropy_bytes)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_ids_are_14_url_safe_chars() {
        let id = RandomUserIdGenerator::default().generate();
        assert_eq!(id.as_str().len(), 14);
        assert!(
            id.as_str()
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_entropy_floor() {
        assert_eq!(RandomUserIdGenerator::new(1).generate().as_str().len(), 14);
        assert_eq!(RandomUserIdGenerator::new(16).generate().as_str().len(), 22);
    }

    #[test]
    fn test_ids_do_not_repeat() {
        let generator = RandomUserIdGenerator::default();
        let ids: HashSet<_> = (0..1000).map(|_| generator.generate()).collect();
        assert_eq!(ids.len(), 1000);
    }
}

//! Argon2id password hasher
//!
//! Hashing is CPU and memory bound (19 MiB per call), so it runs on the
//! blocking pool instead of the async worker threads.

use crate::domain::{
    services::PasswordHasher,
    value_object::user_password::{RawPassword, UserPassword},
};
use crate::error::{RegistrationError, RegistrationResult};

/// Default `PasswordHasher` using the fixed Argon2id parameters
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: RawPassword) -> RegistrationResult<UserPassword> {
        let hashed = tokio::task::spawn_blocking(move || UserPassword::from_raw(&password))
            .await
            .map_err(|e| RegistrationError::Unexpected(format!("Hashing task failed: {}", e)))??;

        Ok(hashed)
    }
}

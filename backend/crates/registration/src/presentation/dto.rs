//! API DTOs (Data Transfer Objects)

use serde::Deserialize;
use std::fmt;

use crate::domain::value_object::credentials::RawCredentials;

// ============================================================================
// Sign Up
// ============================================================================

/// Sign up request
///
/// Fields default to empty so a missing field fails validation instead of
/// deserialization.
#[derive(Clone, Default, Deserialize)]
pub struct SignUpRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl From<SignUpRequest> for RawCredentials {
    fn from(req: SignUpRequest) -> Self {
        RawCredentials {
            username: req.username,
            email: req.email,
            password: req.password,
        }
    }
}

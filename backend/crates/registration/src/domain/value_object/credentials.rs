//! Sign-up credentials
//!
//! `RawCredentials` is the untrusted triple from the client.
//! `ParsedCredentials` only exists after every field passed validation.

use std::fmt;

use super::{email::Email, user_name::UserName, user_password::RawPassword};

/// Unvalidated sign-up input
#[derive(Clone)]
pub struct RawCredentials {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RawCredentials {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for RawCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawCredentials")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Validated sign-up input
#[derive(Debug)]
pub struct ParsedCredentials {
    pub user_name: UserName,
    pub email: Email,
    pub password: RawPassword,
}

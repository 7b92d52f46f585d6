//! Collaborator Traits
//!
//! The sign-up use case only talks to these seams. Default implementations
//! live in `application` and `infra`; tests swap in their own.

use platform::cookie::SessionCookie;

use crate::domain::entity::auth_session::AuthSession;
use crate::domain::value_object::{
    credentials::{ParsedCredentials, RawCredentials},
    user_id::UserId,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{RegistrationResult, ValidationError};

/// Turns untrusted input into typed credentials
pub trait Validator: Send + Sync {
    fn validate(&self, raw: RawCredentials) -> Result<ParsedCredentials, ValidationError>;
}

/// Derives the stored password hash
#[trait_variant::make(PasswordHasher: Send)]
pub trait LocalPasswordHasher {
    async fn hash(&self, password: RawPassword) -> RegistrationResult<UserPassword>;
}

/// Source of fresh user identifiers
pub trait UserIdGenerator: Send + Sync {
    fn generate(&self) -> UserId;
}

/// Creates sessions and their cookie descriptors
#[trait_variant::make(SessionIssuer: Send)]
pub trait LocalSessionIssuer {
    /// Persist a new session for the user
    async fn create_session(&self, user_id: &UserId) -> RegistrationResult<AuthSession>;

    /// Encode a session for transport
    fn create_session_cookie(&self, session: &AuthSession) -> SessionCookie;

    /// Delete a session whose cookie never reached the client
    async fn revoke_session(&self, session: &AuthSession) -> RegistrationResult<()>;
}

/// Outbound cookie channel of the current response
pub trait CookieSink {
    /// Single-shot write; a second call fails
    fn set(&mut self, cookie: SessionCookie) -> RegistrationResult<()>;
}

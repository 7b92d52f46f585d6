//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use uuid::Uuid;

use crate::domain::entity::{auth_session::AuthSession, user::User};
use crate::domain::value_object::{email::Email, user_id::UserId, user_name::UserName};
use crate::error::RegistrationResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Find user whose user name matches case-insensitively
    async fn find_by_user_name_insensitive(
        &self,
        user_name: &UserName,
    ) -> RegistrationResult<Option<User>>;

    /// Find user whose email matches case-insensitively
    async fn find_by_email_insensitive(&self, email: &Email) -> RegistrationResult<Option<User>>;

    /// Create a new user
    ///
    /// Must reject a duplicate canonical user name with `UsernameTaken` and a
    /// duplicate canonical email with `EmailTaken`, atomically with the insert.
    async fn create(&self, user: User) -> RegistrationResult<User>;

    /// Remove a user whose registration did not complete, with its sessions
    async fn discard(&self, user_id: &UserId) -> RegistrationResult<()>;
}

/// Auth session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Create a new session
    async fn create_session(&self, session: &AuthSession) -> RegistrationResult<()>;

    /// Find a session by ID (expired sessions are not returned)
    async fn find_session(&self, session_id: Uuid) -> RegistrationResult<Option<AuthSession>>;

    /// Delete a session
    async fn delete_session(&self, session_id: Uuid) -> RegistrationResult<()>;

    /// Clean up expired sessions
    async fn cleanup_expired(&self) -> RegistrationResult<u64>;
}

//! Sign Up Use Case
//!
//! Creates a new user account and signs the user in.
//!
//! Steps run strictly in order:
//! validate → hash → generate id → username check → email check → create
//! → issue session → write cookie → redirect.
//!
//! The two pre-checks only save work; `UserRepository::create` is the
//! authoritative uniqueness check, so concurrent sign-ups for the same name
//! still end with at most one user.
//!
//! A failure after `create` revokes the session (if any) and discards the
//! user, so a failed attempt leaves nothing behind and can simply be retried.

use std::sync::Arc;

use kernel::error::kind::ErrorKind;

use crate::application::config::RegistrationConfig;
use crate::domain::{
    entity::{auth_session::AuthSession, user::User},
    repository::UserRepository,
    services::{CookieSink, PasswordHasher, SessionIssuer, UserIdGenerator, Validator},
    value_object::{
        credentials::{ParsedCredentials, RawCredentials},
        user_id::UserId,
    },
};
use crate::error::{
    EMAIL_TAKEN_MESSAGE, GENERIC_FAILURE_MESSAGE, RegistrationError, RegistrationResult,
    USERNAME_TAKEN_MESSAGE,
};

/// Result of a sign-up attempt
///
/// `Success` is the redirect signal; the transport layer turns it into a
/// redirect and every other variant into `{"error": ...}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    Success { user_id: UserId, location: String },
    ValidationError,
    UsernameTaken,
    EmailTaken,
    Unexpected { kind: ErrorKind },
}

impl SignUpOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SignUpOutcome::Success { .. })
    }

    /// User-facing error message, `None` on success
    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            SignUpOutcome::Success { .. } => None,
            SignUpOutcome::UsernameTaken => Some(USERNAME_TAKEN_MESSAGE),
            SignUpOutcome::EmailTaken => Some(EMAIL_TAKEN_MESSAGE),
            SignUpOutcome::ValidationError | SignUpOutcome::Unexpected { .. } => {
                Some(GENERIC_FAILURE_MESSAGE)
            }
        }
    }

    /// HTTP classification of a failure, `None` on success
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            SignUpOutcome::Success { .. } => None,
            SignUpOutcome::ValidationError => Some(ErrorKind::BadRequest),
            SignUpOutcome::UsernameTaken | SignUpOutcome::EmailTaken => Some(ErrorKind::Conflict),
            SignUpOutcome::Unexpected { kind } => Some(*kind),
        }
    }
}

impl From<RegistrationError> for SignUpOutcome {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::Validation(_) => SignUpOutcome::ValidationError,
            RegistrationError::UsernameTaken => SignUpOutcome::UsernameTaken,
            RegistrationError::EmailTaken => SignUpOutcome::EmailTaken,
            other => SignUpOutcome::Unexpected {
                kind: other.into_app_error().kind(),
            },
        }
    }
}

/// Warns if dropped while armed: the user row exists but the registration
/// neither finished nor rolled back, so it needs reconciliation.
struct CreatedUserGuard {
    user_id: UserId,
    armed: bool,
}

impl CreatedUserGuard {
    fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for CreatedUserGuard {
    fn drop(&mut self) {
        if self.armed {
            tracing::warn!(
                user_id = %self.user_id,
                "Registration interrupted after user creation; no session cookie was written"
            );
        }
    }
}

/// Failure after the user row exists, with whatever session was persisted
struct IssueFailure {
    error: RegistrationError,
    session: Option<AuthSession>,
}

/// Sign up use case
pub struct SignUpUseCase<V, H, G, U, I>
where
    V: Validator,
    H: PasswordHasher,
    G: UserIdGenerator,
    U: UserRepository,
    I: SessionIssuer,
{
    validator: Arc<V>,
    hasher: Arc<H>,
    id_generator: Arc<G>,
    user_repo: Arc<U>,
    session_issuer: Arc<I>,
    config: Arc<RegistrationConfig>,
}

impl<V, H, G, U, I> SignUpUseCase<V, H, G, U, I>
where
    V: Validator,
    H: PasswordHasher + Sync,
    G: UserIdGenerator,
    U: UserRepository + Sync,
    I: SessionIssuer + Sync,
{
    pub fn new(
        validator: Arc<V>,
        hasher: Arc<H>,
        id_generator: Arc<G>,
        user_repo: Arc<U>,
        session_issuer: Arc<I>,
        config: Arc<RegistrationConfig>,
    ) -> Self {
        Self {
            validator,
            hasher,
            id_generator,
            user_repo,
            session_issuer,
            config,
        }
    }

    /// Register a user, write the session cookie, and report the outcome
    ///
    /// Failures are logged here with their detail; the outcome only carries
    /// what the client may see.
    pub async fn execute<C>(&self, raw: RawCredentials, cookies: &mut C) -> SignUpOutcome
    where
        C: CookieSink + Send,
    {
        match self.try_execute(raw, cookies).await {
            Ok(user_id) => SignUpOutcome::Success {
                user_id,
                location: self.config.redirect_location.clone(),
            },
            Err(e) => {
                e.log();
                SignUpOutcome::from(e)
            }
        }
    }

    /// Same flow as [`execute`](Self::execute), with the error left intact
    pub async fn try_execute<C>(
        &self,
        raw: RawCredentials,
        cookies: &mut C,
    ) -> RegistrationResult<UserId>
    where
        C: CookieSink + Send,
    {
        let ParsedCredentials {
            user_name,
            email,
            password,
        } = self.validator.validate(raw)?;

        let password_hash = self.hasher.hash(password).await?;
        let user_id = self.id_generator.generate();

        if self
            .user_repo
            .find_by_user_name_insensitive(&user_name)
            .await?
            .is_some()
        {
            return Err(RegistrationError::UsernameTaken);
        }

        if self.user_repo.find_by_email_insensitive(&email).await?.is_some() {
            return Err(RegistrationError::EmailTaken);
        }

        let user = self
            .user_repo
            .create(User::register(user_id, user_name, email, password_hash))
            .await?;

        // From here on a failure undoes the user and session rows
        let guard = CreatedUserGuard::new(user.user_id.clone());
        if let Err(failure) = self.issue_session(&user, cookies).await {
            self.roll_back(&user.user_id, failure.session.as_ref()).await;
            guard.disarm();
            return Err(failure.error);
        }
        guard.disarm();

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User signed up"
        );

        Ok(user.user_id)
    }

    async fn issue_session<C>(&self, user: &User, cookies: &mut C) -> Result<(), IssueFailure>
    where
        C: CookieSink + Send,
    {
        let session = self
            .session_issuer
            .create_session(&user.user_id)
            .await
            .map_err(|error| IssueFailure {
                error,
                session: None,
            })?;

        let cookie = self.session_issuer.create_session_cookie(&session);
        cookies.set(cookie).map_err(|error| IssueFailure {
            error,
            session: Some(session),
        })
    }

    /// Remove what a failed registration persisted. Errors here are logged;
    /// the caller still gets the original failure.
    async fn roll_back(&self, user_id: &UserId, session: Option<&AuthSession>) {
        if let Some(session) = session {
            if let Err(e) = self.session_issuer.revoke_session(session).await {
                tracing::error!(
                    user_id = %user_id,
                    session_id = %session.session_id,
                    error = %e,
                    "Failed to revoke session of incomplete registration"
                );
            }
        }

        match self.user_repo.discard(user_id).await {
            Ok(()) => tracing::info!(user_id = %user_id, "Rolled back incomplete registration"),
            Err(e) => tracing::error!(
                user_id = %user_id,
                error = %e,
                "Failed to roll back incomplete registration; user row remains"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_messages() {
        let success = SignUpOutcome::Success {
            user_id: UserId::from_string("u"),
            location: "/".to_string(),
        };
        assert!(success.is_success());
        assert_eq!(success.error_message(), None);
        assert_eq!(success.error_kind(), None);

        assert_eq!(
            SignUpOutcome::UsernameTaken.error_message(),
            Some("Username already taken")
        );
        assert_eq!(
            SignUpOutcome::EmailTaken.error_message(),
            Some("Email already taken")
        );
        assert_eq!(
            SignUpOutcome::ValidationError.error_message(),
            Some("Something went wrong. Please try again.")
        );
        assert_eq!(
            SignUpOutcome::ValidationError.error_kind(),
            Some(ErrorKind::BadRequest)
        );
    }

    #[test]
    fn test_outcome_from_error() {
        assert_eq!(
            SignUpOutcome::from(RegistrationError::EmailTaken),
            SignUpOutcome::EmailTaken
        );
        assert_eq!(
            SignUpOutcome::from(RegistrationError::Persistence(sqlx::Error::PoolTimedOut)),
            SignUpOutcome::Unexpected {
                kind: ErrorKind::ServiceUnavailable
            }
        );
        assert_eq!(
            SignUpOutcome::from(RegistrationError::Persistence(
                crate::infra::postgres::unique_violation("users_pkey")
            )),
            SignUpOutcome::Unexpected {
                kind: ErrorKind::InternalServerError
            }
        );
        assert_eq!(
            SignUpOutcome::from(RegistrationError::Unexpected("x".into())),
            SignUpOutcome::Unexpected {
                kind: ErrorKind::InternalServerError
            }
        );
    }
}

//! Registration Error Types
//!
//! Failure taxonomy of the signup flow. Only the two uniqueness violations
//! reach the user with their own message; every other failure collapses to
//! [`GENERIC_FAILURE_MESSAGE`] and keeps its detail in the logs.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::{PasswordHashError, PasswordPolicyError};
use thiserror::Error;

use crate::domain::value_object::{email::EmailError, user_name::UserNameError};

/// User-facing message for a taken username
pub const USERNAME_TAKEN_MESSAGE: &str = "Username already taken";

/// User-facing message for a taken email
pub const EMAIL_TAKEN_MESSAGE: &str = "Email already taken";

/// User-facing message for every other failure
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Registration result type alias
pub type RegistrationResult<T> = Result<T, RegistrationError>;

/// Field-level validation failure
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid username: {0}")]
    UserName(#[from] UserNameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordPolicyError),
}

/// Registration error variants
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// Malformed or missing input
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Username exists under case-insensitive comparison
    #[error("Username already taken")]
    UsernameTaken,

    /// Email exists under case-insensitive comparison
    #[error("Email already taken")]
    EmailTaken,

    /// Store failure other than a uniqueness violation
    #[error("Persistence error: {0}")]
    Persistence(#[from] sqlx::Error),

    /// Anything else (hashing, cookie channel, task failures)
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl RegistrationError {
    /// Message safe to show the end user
    pub fn user_message(&self) -> &'static str {
        match self {
            RegistrationError::UsernameTaken => USERNAME_TAKEN_MESSAGE,
            RegistrationError::EmailTaken => EMAIL_TAKEN_MESSAGE,
            _ => GENERIC_FAILURE_MESSAGE,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistrationError::Validation(_) => ErrorKind::BadRequest,
            RegistrationError::UsernameTaken | RegistrationError::EmailTaken => {
                ErrorKind::Conflict
            }
            RegistrationError::Persistence(_) | RegistrationError::Unexpected(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to the HTTP-facing AppError, keeping the detail as its source
    pub fn into_app_error(self) -> AppError {
        let message = self.user_message();
        match self {
            RegistrationError::Persistence(e) => {
                // Only an unavailable store keeps its own status; conflicts,
                // missing rows and constraint failures are all server faults here
                let source = AppError::from(e);
                let kind = match source.kind() {
                    ErrorKind::ServiceUnavailable => ErrorKind::ServiceUnavailable,
                    _ => ErrorKind::InternalServerError,
                };
                AppError::new(kind, message).with_source(source)
            }
            other => AppError::new(other.kind(), message).with_source(other),
        }
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        match self {
            RegistrationError::Persistence(e) => {
                tracing::error!(error = %e, "Registration database error");
            }
            RegistrationError::Unexpected(msg) => {
                tracing::error!(message = %msg, "Registration internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Registration rejected");
            }
        }
    }
}

impl From<PasswordHashError> for RegistrationError {
    fn from(err: PasswordHashError) -> Self {
        RegistrationError::Unexpected(err.to_string())
    }
}

impl From<PasswordPolicyError> for RegistrationError {
    fn from(err: PasswordPolicyError) -> Self {
        RegistrationError::Validation(err.into())
    }
}

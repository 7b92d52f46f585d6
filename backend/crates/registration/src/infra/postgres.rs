//! PostgreSQL Repository Implementations
//!
//! Uniqueness of user names and emails is enforced by unique indexes on the
//! canonical (lowercase) columns. A violation on insert is the authoritative
//! "taken" signal; the use case pre-checks only avoid wasted work.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{auth_session::AuthSession, user::User};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{
    email::Email, user_id::UserId, user_name::UserName, user_password::UserPassword,
};
use crate::error::{RegistrationError, RegistrationResult};

/// Unique index on `users.user_name_canonical`
pub const USER_NAME_UNIQUE_CONSTRAINT: &str = "users_user_name_canonical_key";

/// Unique index on `users.email_canonical`
pub const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_canonical_key";

/// PostgreSQL-backed registration repository
#[derive(Clone)]
pub struct PgRegistrationRepository {
    pool: PgPool,
}

impl PgRegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Classify an insert failure: unique violations on the canonical columns
/// become "taken" errors, everything else stays a persistence error.
fn map_insert_error(err: sqlx::Error) -> RegistrationError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            match db_err.constraint() {
                Some(USER_NAME_UNIQUE_CONSTRAINT) => return RegistrationError::UsernameTaken,
                Some(EMAIL_UNIQUE_CONSTRAINT) => return RegistrationError::EmailTaken,
                _ => {}
            }
        }
    }
    RegistrationError::Persistence(err)
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgRegistrationRepository {
    async fn find_by_user_name_insensitive(
        &self,
        user_name: &UserName,
    ) -> RegistrationResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                user_name,
                display_name,
                email,
                password_hash,
                created_at
            FROM users
            WHERE user_name_canonical = $1
            "#,
        )
        .bind(user_name.canonical())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_email_insensitive(&self, email: &Email) -> RegistrationResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                user_name,
                display_name,
                email,
                password_hash,
                created_at
            FROM users
            WHERE email_canonical = $1
            "#,
        )
        .bind(email.canonical())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn create(&self, user: User) -> RegistrationResult<User> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                user_name,
                user_name_canonical,
                display_name,
                email,
                email_canonical,
                password_hash,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.user_id.as_str())
        .bind(user.user_name.original())
        .bind(user.user_name.canonical())
        .bind(&user.display_name)
        .bind(user.email.original())
        .bind(user.email.canonical())
        .bind(user.password_hash.as_phc_string())
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(user)
    }

    async fn discard(&self, user_id: &UserId) -> RegistrationResult<()> {
        // Sessions reference the user, so they go first in the same transaction
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM auth_sessions WHERE user_id = $1")
            .bind(user_id.as_str())
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id.as_str())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for PgRegistrationRepository {
    async fn create_session(&self, session: &AuthSession) -> RegistrationResult<()> {
        sqlx::query(
            r#"
            INSERT INTO auth_sessions (
                session_id,
                user_id,
                expires_at,
                created_at
            ) VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(session.session_id)
        .bind(session.user_id.as_str())
        .bind(session.expires_at)
        .bind(session.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_session(&self, session_id: Uuid) -> RegistrationResult<Option<AuthSession>> {
        let row = sqlx::query_as::<_, AuthSessionRow>(
            r#"
            SELECT
                session_id,
                user_id,
                expires_at,
                created_at
            FROM auth_sessions
            WHERE session_id = $1 AND expires_at > $2
            "#,
        )
        .bind(session_id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AuthSessionRow::into_session))
    }

    async fn delete_session(&self, session_id: Uuid) -> RegistrationResult<()> {
        sqlx::query("DELETE FROM auth_sessions WHERE session_id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn cleanup_expired(&self) -> RegistrationResult<u64> {
        let deleted = sqlx::query("DELETE FROM auth_sessions WHERE expires_at <= $1")
            .bind(Utc::now())
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired auth sessions");

        Ok(deleted)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: String,
    user_name: String,
    display_name: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> RegistrationResult<User> {
        Ok(User {
            user_id: UserId::from_string(self.user_id),
            user_name: UserName::from_db(&self.user_name),
            display_name: self.display_name,
            email: Email::from_db(self.email),
            password_hash: UserPassword::from_phc_string(self.password_hash)?,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AuthSessionRow {
    session_id: Uuid,
    user_id: String,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl AuthSessionRow {
    fn into_session(self) -> AuthSession {
        AuthSession {
            session_id: self.session_id,
            user_id: UserId::from_string(self.user_id),
            expires_at: self.expires_at,
            created_at: self.created_at,
        }
    }
}

/// A Postgres-shaped unique violation, for exercising error classification
/// without a database.
#[cfg(test)]
pub(crate) fn unique_violation(constraint: &'static str) -> sqlx::Error {
    sqlx::Error::Database(Box::new(test_support::UniqueViolation { constraint }))
}

#[cfg(test)]
mod test_support {
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    use sqlx::error::{DatabaseError, ErrorKind};

    #[derive(Debug)]
    pub(super) struct UniqueViolation {
        pub(super) constraint: &'static str,
    }

    impl fmt::Display for UniqueViolation {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(
                f,
                "duplicate key value violates unique constraint \"{}\"",
                self.constraint
            )
        }
    }

    impl StdError for UniqueViolation {}

    impl DatabaseError for UniqueViolation {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed("23505"))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn constraint(&self) -> Option<&str> {
            Some(self.constraint)
        }

        fn kind(&self) -> ErrorKind {
            ErrorKind::UniqueViolation
        }
    }
}

//! Session Issuer
//!
//! Persists a server-side session for a freshly registered user and encodes
//! it as a signed cookie: `<session_id>.<base64url(HMAC-SHA256(secret, session_id))>`.

use std::sync::Arc;

use platform::{
    cookie::{CookieAttributes, SessionCookie},
    crypto,
};
use uuid::Uuid;

use crate::application::config::RegistrationConfig;
use crate::domain::{
    entity::auth_session::AuthSession, repository::SessionRepository, services::SessionIssuer,
    value_object::user_id::UserId,
};
use crate::error::RegistrationResult;

/// Session issuer backed by a session repository
pub struct ServerSessionIssuer<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<RegistrationConfig>,
}

impl<S> ServerSessionIssuer<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<RegistrationConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Generate signed session token
    fn sign_session_id(&self, session_id: Uuid) -> String {
        let session_id = session_id.to_string();
        let signature = crypto::hmac_sha256(&self.config.session_secret, session_id.as_bytes());

        format!("{}.{}", session_id, crypto::to_base64url(&signature))
    }

    /// Verify a session token and extract the session id
    ///
    /// Returns `None` for malformed tokens and bad signatures alike.
    pub fn verify_session_token(&self, token: &str) -> Option<Uuid> {
        let (session_id_str, signature_b64) = token.split_once('.')?;

        let signature = crypto::from_base64url(signature_b64).ok()?;
        let expected = crypto::hmac_sha256(&self.config.session_secret, session_id_str.as_bytes());

        if !crypto::constant_time_eq(&signature, &expected) {
            return None;
        }

        session_id_str.parse().ok()
    }

    /// Look up the live session a token refers to
    pub async fn resolve_session(&self, token: &str) -> RegistrationResult<Option<AuthSession>> {
        let Some(session_id) = self.verify_session_token(token) else {
            return Ok(None);
        };

        let session = self.session_repo.find_session(session_id).await?;
        Ok(session.filter(|session| !session.is_expired()))
    }
}

impl<S> SessionIssuer for ServerSessionIssuer<S>
where
    S: SessionRepository + Send + Sync,
{
    async fn create_session(&self, user_id: &UserId) -> RegistrationResult<AuthSession> {
        let session = AuthSession::new(user_id.clone(), self.config.session_ttl_chrono());
        self.session_repo.create_session(&session).await?;

        tracing::debug!(
            session_id = %session.session_id,
            user_id = %user_id,
            "Session created"
        );

        Ok(session)
    }

    fn create_session_cookie(&self, session: &AuthSession) -> SessionCookie {
        SessionCookie::new(
            self.config.session_cookie_name.clone(),
            self.sign_session_id(session.session_id),
            CookieAttributes {
                path: "/".to_string(),
                http_only: true,
                secure: self.config.cookie_secure,
                same_site: self.config.cookie_same_site,
                max_age_secs: Some(self.config.session_ttl_secs()),
            },
        )
    }

    async fn revoke_session(&self, session: &AuthSession) -> RegistrationResult<()> {
        self.session_repo.delete_session(session.session_id).await
    }
}

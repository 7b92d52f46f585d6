//! In-memory Repository
//!
//! Same contract as the PostgreSQL repository, backed by maps behind one
//! `RwLock`. Used by tests and by the server when no database is configured.

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entity::{auth_session::AuthSession, user::User};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_id::UserId, user_name::UserName};
use crate::error::{RegistrationError, RegistrationResult};

#[derive(Default)]
struct Store {
    /// Users keyed by canonical user name
    users: HashMap<String, User>,
    /// Canonical email → canonical user name
    emails: HashMap<String, String>,
    sessions: HashMap<Uuid, AuthSession>,
}

/// In-memory registration repository
#[derive(Default)]
pub struct InMemoryRegistrationRepository {
    store: RwLock<Store>,
}

impl InMemoryRegistrationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn user_count(&self) -> usize {
        self.store.read().await.users.len()
    }

    /// Number of stored sessions, expired ones included
    pub async fn session_count(&self) -> usize {
        self.store.read().await.sessions.len()
    }

    /// All sessions belonging to a user
    pub async fn sessions_for(&self, user_id: &str) -> Vec<AuthSession> {
        self.store
            .read()
            .await
            .sessions
            .values()
            .filter(|session| session.user_id.as_str() == user_id)
            .cloned()
            .collect()
    }
}

impl UserRepository for InMemoryRegistrationRepository {
    async fn find_by_user_name_insensitive(
        &self,
        user_name: &UserName,
    ) -> RegistrationResult<Option<User>> {
        Ok(self.store.read().await.users.get(user_name.canonical()).cloned())
    }

    async fn find_by_email_insensitive(&self, email: &Email) -> RegistrationResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store
            .emails
            .get(email.canonical())
            .and_then(|user_name| store.users.get(user_name))
            .cloned())
    }

    async fn create(&self, user: User) -> RegistrationResult<User> {
        // Both checks and the insert happen under one write lock
        let mut store = self.store.write().await;

        let user_name_key = user.user_name.canonical().to_string();
        let email_key = user.email.canonical().to_string();

        if store.users.contains_key(&user_name_key) {
            return Err(RegistrationError::UsernameTaken);
        }
        if store.emails.contains_key(&email_key) {
            return Err(RegistrationError::EmailTaken);
        }

        store.emails.insert(email_key, user_name_key.clone());
        store.users.insert(user_name_key, user.clone());

        Ok(user)
    }

    async fn discard(&self, user_id: &UserId) -> RegistrationResult<()> {
        let mut store = self.store.write().await;

        let user_name_key = store
            .users
            .iter()
            .find(|(_, user)| &user.user_id == user_id)
            .map(|(key, _)| key.clone());

        if let Some(key) = user_name_key {
            if let Some(user) = store.users.remove(&key) {
                store.emails.remove(user.email.canonical());
            }
        }
        store.sessions.retain(|_, session| &session.user_id != user_id);

        Ok(())
    }
}

impl SessionRepository for InMemoryRegistrationRepository {
    async fn create_session(&self, session: &AuthSession) -> RegistrationResult<()> {
        self.store
            .write()
            .await
            .sessions
            .insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find_session(&self, session_id: Uuid) -> RegistrationResult<Option<AuthSession>> {
        Ok(self
            .store
            .read()
            .await
            .sessions
            .get(&session_id)
            .filter(|session| !session.is_expired())
            .cloned())
    }

    async fn delete_session(&self, session_id: Uuid) -> RegistrationResult<()> {
        self.store.write().await.sessions.remove(&session_id);
        Ok(())
    }

    async fn cleanup_expired(&self) -> RegistrationResult<u64> {
        let now = Utc::now();
        let mut store = self.store.write().await;
        let before = store.sessions.len();
        store.sessions.retain(|_, session| session.expires_at > now);
        let deleted = (before - store.sessions.len()) as u64;

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired auth sessions");

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::{RawPassword, UserPassword};
    use chrono::Duration;
    use std::sync::OnceLock;

    fn password_hash() -> UserPassword {
        static HASH: OnceLock<UserPassword> = OnceLock::new();
        HASH.get_or_init(|| {
            let raw = RawPassword::new("Secret123!".to_string()).unwrap();
            UserPassword::from_raw(&raw).unwrap()
        })
        .clone()
    }

    fn user(id: &str, name: &str, email: &str) -> User {
        User::register(
            UserId::from_string(id),
            UserName::new(name).unwrap(),
            Email::new(email).unwrap(),
            password_hash(),
        )
    }

    #[tokio::test]
    async fn test_lookups_are_case_insensitive() {
        let repo = InMemoryRegistrationRepository::new();
        repo.create(user("1", "Alice", "Alice@X.com")).await.unwrap();

        let by_name = repo
            .find_by_user_name_insensitive(&UserName::new("ALICE").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_name.user_name.original(), "Alice");

        let by_email = repo
            .find_by_email_insensitive(&Email::new("alice@x.COM").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.user_id.as_str(), "1");
    }

    #[tokio::test]
    async fn test_create_enforces_uniqueness() {
        let repo = InMemoryRegistrationRepository::new();
        repo.create(user("1", "alice", "a@x.com")).await.unwrap();

        assert!(matches!(
            repo.create(user("2", "ALICE", "b@x.com")).await,
            Err(RegistrationError::UsernameTaken)
        ));
        assert!(matches!(
            repo.create(user("3", "bob", "A@X.COM")).await,
            Err(RegistrationError::EmailTaken)
        ));
        assert_eq!(repo.user_count().await, 1);
    }

    #[tokio::test]
    async fn test_discard_frees_name_email_and_sessions() {
        let repo = InMemoryRegistrationRepository::new();
        repo.create(user("1", "alice", "a@x.com")).await.unwrap();
        repo.create(user("2", "bob", "b@x.com")).await.unwrap();
        repo.create_session(&AuthSession::new(UserId::from_string("1"), Duration::days(1)))
            .await
            .unwrap();
        repo.create_session(&AuthSession::new(UserId::from_string("2"), Duration::days(1)))
            .await
            .unwrap();

        repo.discard(&UserId::from_string("1")).await.unwrap();

        assert_eq!(repo.user_count().await, 1);
        assert!(repo.sessions_for("1").await.is_empty());
        assert_eq!(repo.sessions_for("2").await.len(), 1);

        // Name and email are free again
        repo.create(user("3", "ALICE", "A@x.com")).await.unwrap();
        assert_eq!(repo.user_count().await, 2);
    }

    #[tokio::test]
    async fn test_cleanup_expired_sessions() {
        let repo = InMemoryRegistrationRepository::new();
        let live = AuthSession::new(UserId::from_string("1"), Duration::days(1));
        let mut stale = AuthSession::new(UserId::from_string("1"), Duration::days(1));
        stale.expires_at = Utc::now() - Duration::seconds(5);

        repo.create_session(&live).await.unwrap();
        repo.create_session(&stale).await.unwrap();

        assert!(repo.find_session(stale.session_id).await.unwrap().is_none());
        assert_eq!(repo.cleanup_expired().await.unwrap(), 1);
        assert_eq!(repo.session_count().await, 1);

        repo.delete_session(live.session_id).await.unwrap();
        assert_eq!(repo.session_count().await, 0);
    }
}

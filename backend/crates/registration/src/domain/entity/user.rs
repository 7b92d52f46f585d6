//! User Entity
//!
//! Account record created once per successful sign-up.
//! Never mutated or deleted by the registration flow.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email, user_id::UserId, user_name::UserName, user_password::UserPassword,
};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Opaque identifier, independent of username and email
    pub user_id: UserId,
    /// User name (unique case-insensitively)
    pub user_name: UserName,
    /// Name shown to other users, starts out as the user name as typed
    pub display_name: String,
    /// Email (unique case-insensitively)
    pub email: Email,
    /// Argon2id hash, never the plaintext
    pub password_hash: UserPassword,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a new user for registration
    pub fn register(
        user_id: UserId,
        user_name: UserName,
        email: Email,
        password_hash: UserPassword,
    ) -> Self {
        Self {
            display_name: user_name.original().to_string(),
            user_id,
            user_name,
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::RawPassword;

    #[test]
    fn test_register_defaults_display_name_to_user_name() {
        let raw = RawPassword::new("Secret123!".to_string()).unwrap();
        let user = User::register(
            UserId::from_string("abc"),
            UserName::new("Alice").unwrap(),
            Email::new("a@x.com").unwrap(),
            UserPassword::from_raw(&raw).unwrap(),
        );

        assert_eq!(user.display_name, "Alice");
        assert_eq!(user.user_name.canonical(), "alice");
        assert_eq!(user.user_id.as_str(), "abc");
    }
}

//! Email Value Object
//!
//! Represents a validated email address.
//! Basic validation only. The input casing is kept for display, while the
//! lowercase canonical form drives uniqueness.

use std::fmt;

use thiserror::Error;

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// Maximum local part length (per RFC 5321)
const LOCAL_PART_MAX_LENGTH: usize = 64;

/// Error returned when email validation fails
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("Email cannot be empty")]
    Empty,

    #[error("Email must be at most {max} characters")]
    TooLong { max: usize },

    #[error("Invalid email format")]
    InvalidFormat,
}

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email {
    original: String,
    canonical: String,
}

impl Email {
    /// Create a new email with validation
    pub fn new(email: impl AsRef<str>) -> Result<Self, EmailError> {
        let original = email.as_ref().trim().to_string();

        if original.is_empty() {
            return Err(EmailError::Empty);
        }

        if original.len() > EMAIL_MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: EMAIL_MAX_LENGTH,
            });
        }

        let canonical = original.to_lowercase();
        if !Self::is_valid_format(&canonical) {
            return Err(EmailError::InvalidFormat);
        }

        Ok(Self {
            original,
            canonical,
        })
    }

    /// Basic email format validation
    fn is_valid_format(email: &str) -> bool {
        // Must contain exactly one @
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };
        if domain.contains('@') {
            return false;
        }

        if local.is_empty() || local.len() > LOCAL_PART_MAX_LENGTH {
            return false;
        }
        if local.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return false;
        }

        if domain.is_empty() || !domain.contains('.') {
            return false;
        }
        if !domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return false;
        }
        if domain.starts_with(['.', '-']) || domain.ends_with(['.', '-']) {
            return false;
        }
        if domain.contains("..") {
            return false;
        }

        true
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(original: impl Into<String>) -> Self {
        let original = original.into();
        let canonical = original.to_lowercase();
        Self {
            original,
            canonical,
        }
    }

    /// Email as the user typed it (trimmed)
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Lowercase form used for uniqueness
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Get the domain part of the email
    pub fn domain(&self) -> &str {
        self.canonical.split('@').nth(1).unwrap_or("")
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_valid() {
        assert!(Email::new("user@example.com").is_ok());
        assert!(Email::new("user.name@example.co.jp").is_ok());
        assert!(Email::new("user+tag@example.com").is_ok());
        assert!(Email::new("a@x.com").is_ok());
    }

    #[test]
    fn test_email_keeps_original_and_lowercases_canonical() {
        let email = Email::new("  User@Example.COM ").unwrap();
        assert_eq!(email.original(), "User@Example.COM");
        assert_eq!(email.canonical(), "user@example.com");
        assert_eq!(email.domain(), "example.com");
    }

    #[test]
    fn test_email_invalid() {
        assert_eq!(Email::new("").unwrap_err(), EmailError::Empty);
        assert_eq!(Email::new("   ").unwrap_err(), EmailError::Empty);
        for bad in [
            "invalid",
            "@example.com",
            "user@",
            "user@example",
            "user@@example.com",
            "user@.example.com",
            "user@example.com-",
            "user@exa mple.com",
            "us er@example.com",
            "user@example..com",
        ] {
            assert_eq!(
                Email::new(bad).unwrap_err(),
                EmailError::InvalidFormat,
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_email_too_long() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert!(matches!(
            Email::new(long),
            Err(EmailError::TooLong { .. })
        ));
    }

    #[test]
    fn test_from_db_derives_canonical() {
        let email = Email::from_db("Bob@Example.com");
        assert_eq!(email.canonical(), "bob@example.com");
    }
}

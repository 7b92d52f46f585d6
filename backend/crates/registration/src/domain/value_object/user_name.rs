//! User Name Value Object
//!
//! ユーザー名は、ユーザーを識別するための公開ハンドル。
//!
//! ## 設計方針
//! - ASCII 英数字と `_` `-` のみ許可
//! - 入力の大文字小文字は保持し（表示名の初期値になる）、一意性判定は小文字の canonical で行う
//! - NFKC 正規化 → trim → 検証 の順で処理
//!
//! ## 不変条件
//! - 長さ: 3〜30文字（正規化後）
//! - 英数字を最低1文字含む
//! - 予約語ではない

use std::fmt;

use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

// ============================================================================
// Constants
// ============================================================================

/// Minimum length for user name (in characters)
pub const USER_NAME_MIN_LENGTH: usize = 3;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 30;

/// Allowed special characters in user name
const ALLOWED_SPECIAL_CHARS: &[char] = &['_', '-'];

/// Reserved words that cannot be used as user names (canonical form)
const DEFAULT_RESERVED_WORDS: &[&str] = &[
    // System/Admin
    "admin",
    "administrator",
    "root",
    "system",
    "moderator",
    "staff",
    "support",
    // Routing
    "api",
    "auth",
    "login",
    "logout",
    "signin",
    "signout",
    "signup",
    "register",
    "settings",
    // Common reserved
    "null",
    "undefined",
    "anonymous",
    "me",
];

// ============================================================================
// Error Types
// ============================================================================

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserNameError {
    #[error("User name cannot be empty")]
    Empty,

    #[error("User name is too short ({length} chars, minimum {min})")]
    TooShort { length: usize, min: usize },

    #[error("User name is too long ({length} chars, maximum {max})")]
    TooLong { length: usize, max: usize },

    #[error("Invalid character '{char}' at position {position}. Only letters, numbers, - and _ are allowed")]
    InvalidCharacter { char: char, position: usize },

    #[error("User name must contain at least one letter or digit")]
    NoAlphanumeric,

    #[error("'{word}' is a reserved user name")]
    Reserved { word: String },
}

// ============================================================================
// UserName Value Object
// ============================================================================

/// Validated, normalized user name
///
/// # Storage
/// - `original`: The user's input (trimmed, NFKC normalized, preserves case)
/// - `canonical`: Lowercase form for uniqueness checks
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct UserName {
    original: String,
    canonical: String,
}

impl UserName {
    /// Create a new UserName from raw input
    pub fn new(input: impl AsRef<str>) -> Result<Self, UserNameError> {
        Self::new_with_reserved(input, DEFAULT_RESERVED_WORDS)
    }

    /// Create a new UserName with a custom reserved words list
    pub fn new_with_reserved(
        input: impl AsRef<str>,
        reserved_words: &[&str],
    ) -> Result<Self, UserNameError> {
        let original: String = input.as_ref().nfkc().collect::<String>().trim().to_string();
        let canonical = original.to_lowercase();
        Self::validate(&canonical, reserved_words)?;
        Ok(Self {
            original,
            canonical,
        })
    }

    /// Get the original user name (preserves case)
    #[inline]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Get the canonical (lowercase) user name
    #[inline]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Create from database values (assumes already validated)
    pub fn from_db(original: &str) -> Self {
        Self {
            original: original.to_string(),
            canonical: original.to_lowercase(),
        }
    }

    fn validate(canonical: &str, reserved_words: &[&str]) -> Result<(), UserNameError> {
        if canonical.is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = canonical.chars().count();
        if length < USER_NAME_MIN_LENGTH {
            return Err(UserNameError::TooShort {
                length,
                min: USER_NAME_MIN_LENGTH,
            });
        }
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        if let Some((position, char)) = canonical
            .chars()
            .enumerate()
            .find(|(_, c)| !Self::is_valid_char(*c))
        {
            return Err(UserNameError::InvalidCharacter { char, position });
        }

        if !canonical.chars().any(|c| c.is_ascii_alphanumeric()) {
            return Err(UserNameError::NoAlphanumeric);
        }

        if reserved_words.iter().any(|&w| w == canonical) {
            return Err(UserNameError::Reserved {
                word: canonical.to_string(),
            });
        }

        Ok(())
    }

    #[inline]
    fn is_valid_char(c: char) -> bool {
        c.is_ascii_lowercase() || c.is_ascii_digit() || ALLOWED_SPECIAL_CHARS.contains(&c)
    }
}

impl fmt::Debug for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserName")
            .field("original", &self.original)
            .field("canonical", &self.canonical)
            .finish()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod normalization {
        use super::*;

        #[test]
        fn test_trim_whitespace() {
            let name = UserName::new("  alice  ").unwrap();
            assert_eq!(name.original(), "alice");
        }

        #[test]
        fn test_preserves_case_in_original() {
            let name = UserName::new("Alice").unwrap();
            assert_eq!(name.original(), "Alice");
            assert_eq!(name.canonical(), "alice");
        }

        #[test]
        fn test_case_variants_share_canonical() {
            let upper = UserName::new("ALICE").unwrap();
            let lower = UserName::new("alice").unwrap();
            assert_eq!(upper.canonical(), lower.canonical());
            assert_ne!(upper, lower);
        }

        #[test]
        fn test_nfkc_normalization() {
            // Full-width 'Ａ' (U+FF21) becomes ASCII 'A'
            let name = UserName::new("Ａlice").unwrap();
            assert_eq!(name.original(), "Alice");
        }
    }

    mod validation {
        use super::*;

        #[test]
        fn test_valid_names() {
            for name in ["bob", "Alice_01", "dash-ed", "__x__", "a1b"] {
                assert!(UserName::new(name).is_ok(), "{name} should be valid");
            }
        }

        #[test]
        fn test_empty() {
            assert_eq!(UserName::new("   ").unwrap_err(), UserNameError::Empty);
        }

        #[test]
        fn test_length_bounds() {
            assert!(matches!(
                UserName::new("ab"),
                Err(UserNameError::TooShort { length: 2, .. })
            ));
            assert!(matches!(
                UserName::new("a".repeat(31)),
                Err(UserNameError::TooLong { length: 31, .. })
            ));
            assert!(UserName::new("a".repeat(30)).is_ok());
        }

        #[test]
        fn test_invalid_characters() {
            assert_eq!(
                UserName::new("bad name").unwrap_err(),
                UserNameError::InvalidCharacter {
                    char: ' ',
                    position: 3
                }
            );
            assert!(matches!(
                UserName::new("a.b.c"),
                Err(UserNameError::InvalidCharacter { char: '.', .. })
            ));
            assert!(matches!(
                UserName::new("ユーザー"),
                Err(UserNameError::InvalidCharacter { .. })
            ));
        }

        #[test]
        fn test_symbols_only() {
            assert_eq!(UserName::new("___").unwrap_err(), UserNameError::NoAlphanumeric);
        }

        #[test]
        fn test_reserved_is_case_insensitive() {
            assert!(matches!(
                UserName::new("Admin"),
                Err(UserNameError::Reserved { .. })
            ));
        }

        #[test]
        fn test_custom_reserved_list() {
            assert!(UserName::new_with_reserved("admin", &[]).is_ok());
            assert!(UserName::new_with_reserved("alice", &["alice"]).is_err());
        }
    }
}

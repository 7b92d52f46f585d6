//! Sign-up input validation
//!
//! Fields are checked in form order (username, email, password) and the
//! first failure wins.

use crate::domain::{
    services::Validator,
    value_object::{
        credentials::{ParsedCredentials, RawCredentials},
        email::Email,
        user_name::UserName,
        user_password::RawPassword,
    },
};
use crate::error::ValidationError;

/// Default validator backed by the domain value objects
#[derive(Debug, Clone, Default)]
pub struct SignUpValidator {
    reserved_user_names: Option<Vec<String>>,
}

impl SignUpValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the built-in reserved user name list
    pub fn with_reserved_user_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved_user_names = Some(
            names
                .into_iter()
                .map(|name| Into::<String>::into(name).to_lowercase())
                .collect(),
        );
        self
    }

    fn parse_user_name(&self, raw: &str) -> Result<UserName, ValidationError> {
        let user_name = match &self.reserved_user_names {
            Some(reserved) => {
                let reserved: Vec<&str> = reserved.iter().map(String::as_str).collect();
                UserName::new_with_reserved(raw, &reserved)?
            }
            None => UserName::new(raw)?,
        };
        Ok(user_name)
    }
}

impl Validator for SignUpValidator {
    fn validate(&self, raw: RawCredentials) -> Result<ParsedCredentials, ValidationError> {
        let RawCredentials {
            username,
            email,
            password,
        } = raw;

        let user_name = self.parse_user_name(&username)?;
        let email = Email::new(&email)?;
        let password = RawPassword::new(password)?;

        Ok(ParsedCredentials {
            user_name,
            email,
            password,
        })
    }
}

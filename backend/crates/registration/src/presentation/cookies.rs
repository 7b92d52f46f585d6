//! Response cookie sink
//!
//! Collects the session cookie for the outgoing response. One write per
//! response; the handler copies it into a `Set-Cookie` header.

use axum::http::HeaderValue;
use platform::cookie::SessionCookie;

use crate::domain::services::CookieSink;
use crate::error::{RegistrationError, RegistrationResult};

/// `CookieSink` for a single HTTP response
#[derive(Debug, Default)]
pub struct ResponseCookies {
    set_cookie: Option<HeaderValue>,
}

impl ResponseCookies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered `Set-Cookie` value, if a cookie was written
    pub fn into_header_value(self) -> Option<HeaderValue> {
        self.set_cookie
    }
}

impl CookieSink for ResponseCookies {
    fn set(&mut self, cookie: SessionCookie) -> RegistrationResult<()> {
        if self.set_cookie.is_some() {
            return Err(RegistrationError::Unexpected(
                "Session cookie already written for this response".to_string(),
            ));
        }

        let value = cookie.to_header_value().ok_or_else(|| {
            RegistrationError::Unexpected(format!(
                "Cookie '{}' cannot be encoded as a header",
                cookie.name
            ))
        })?;

        self.set_cookie = Some(value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::cookie::CookieAttributes;

    #[test]
    fn test_second_write_is_rejected() {
        let mut cookies = ResponseCookies::new();
        cookies
            .set(SessionCookie::new("a", "1", CookieAttributes::default()))
            .unwrap();

        assert!(matches!(
            cookies.set(SessionCookie::new("b", "2", CookieAttributes::default())),
            Err(RegistrationError::Unexpected(_))
        ));

        let value = cookies.into_header_value().unwrap();
        assert!(value.to_str().unwrap().starts_with("a=1;"));
    }

    #[test]
    fn test_unencodable_cookie_is_rejected() {
        let mut cookies = ResponseCookies::new();
        assert!(
            cookies
                .set(SessionCookie::new("a", "x\ny", CookieAttributes::default()))
                .is_err()
        );
        assert!(cookies.into_header_value().is_none());
    }
}

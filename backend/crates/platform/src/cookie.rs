//! Cookie Management Infrastructure
//!
//! Session cookie descriptors (name, value, attributes) and their
//! `Set-Cookie` rendering.

use axum::http::HeaderValue;

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Cookie attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieAttributes {
    pub path: String,
    pub http_only: bool,
    pub secure: bool,
    pub same_site: SameSite,
    pub max_age_secs: Option<i64>,
}

impl Default for CookieAttributes {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            http_only: true,
            secure: true,
            same_site: SameSite::Lax,
            max_age_secs: None,
        }
    }
}

/// Transport-ready cookie: name, value and attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    pub attributes: CookieAttributes,
}

impl SessionCookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>, attributes: CookieAttributes) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            attributes,
        }
    }

    /// Build Set-Cookie header value
    pub fn to_set_cookie(&self) -> String {
        let attributes = &self.attributes;
        let mut parts = vec![format!("{}={}", self.name, self.value)];

        if attributes.http_only {
            parts.push("HttpOnly".to_string());
        }
        if attributes.secure {
            parts.push("Secure".to_string());
        }
        parts.push(format!("SameSite={}", attributes.same_site.as_str()));
        parts.push(format!("Path={}", attributes.path));

        if let Some(max_age) = attributes.max_age_secs {
            parts.push(format!("Max-Age={}", max_age));
        }

        parts.join("; ")
    }

    /// Set-Cookie header value, `None` if name or value contain bytes a
    /// header cannot carry
    pub fn to_header_value(&self) -> Option<HeaderValue> {
        HeaderValue::from_str(&self.to_set_cookie()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_cookie_rendering() {
        let cookie = SessionCookie::new(
            "auth_session",
            "abc.def",
            CookieAttributes {
                path: "/".to_string(),
                http_only: true,
                secure: true,
                same_site: SameSite::Lax,
                max_age_secs: Some(3600),
            },
        );

        assert_eq!(
            cookie.to_set_cookie(),
            "auth_session=abc.def; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age=3600"
        );
    }

    #[test]
    fn test_insecure_cookie_omits_secure() {
        let cookie = SessionCookie::new(
            "s",
            "v",
            CookieAttributes {
                secure: false,
                ..CookieAttributes::default()
            },
        );

        let rendered = cookie.to_set_cookie();
        assert!(!rendered.contains("Secure"));
        assert!(rendered.contains("HttpOnly"));
        assert!(!rendered.contains("Max-Age"));
    }

    #[test]
    fn test_header_value_rejects_newlines() {
        let cookie = SessionCookie::new("s", "v\r\nX-Injected: 1", CookieAttributes::default());
        assert!(cookie.to_header_value().is_none());
    }
}

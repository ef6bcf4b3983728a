use axum::http::{header::InvalidHeaderValue, HeaderValue};
use std::{fmt, time::Duration};

/// Name, path and `HttpOnly` flag shared by every rendering of one token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct CookieAttributes {
    pub(super) name: String,
    pub(super) path: String,
    pub(super) http_only: bool,
}

/// Servlet-style cookie: the value is absent when the cookie is being
/// deleted and the lifetime is a plain number of seconds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegacyCookie {
    pub name: String,
    pub value: Option<String>,
    pub path: String,
    pub http_only: bool,
    pub max_age: i32,
}

/// Response-cookie style: the value is always present (empty when deleting)
/// and the lifetime is a [`Duration`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructuredCookie {
    pub name: String,
    pub value: String,
    pub path: String,
    pub http_only: bool,
    pub max_age: Duration,
}

impl LegacyCookie {
    pub(super) fn new(attributes: CookieAttributes, value: Option<String>, max_age: i32) -> Self {
        Self {
            name: attributes.name,
            value,
            path: attributes.path,
            http_only: attributes.http_only,
            max_age,
        }
    }

    /// Render as a `Set-Cookie` header value.
    ///
    /// # Errors
    /// Returns an error if the name or value contain bytes not allowed in a header.
    pub fn to_header_value(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        HeaderValue::from_str(&self.to_string())
    }
}

impl StructuredCookie {
    pub(super) fn new(attributes: CookieAttributes, value: String, max_age: Duration) -> Self {
        Self {
            name: attributes.name,
            value,
            path: attributes.path,
            http_only: attributes.http_only,
            max_age,
        }
    }

    /// Render as a `Set-Cookie` header value.
    ///
    /// # Errors
    /// Returns an error if the name or value contain bytes not allowed in a header.
    pub fn to_header_value(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        HeaderValue::from_str(&self.to_string())
    }
}

fn write_set_cookie(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    value: &str,
    path: &str,
    http_only: bool,
    max_age_seconds: u64,
) -> fmt::Result {
    write!(f, "{name}={value}")?;
    if !path.is_empty() {
        write!(f, "; Path={path}")?;
    }
    if http_only {
        f.write_str("; HttpOnly")?;
    }
    write!(f, "; Max-Age={max_age_seconds}")
}

impl fmt::Display for LegacyCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Negative ages are session cookies in the servlet model; never emit them.
        let max_age = u64::try_from(self.max_age).unwrap_or(0);
        write_set_cookie(
            f,
            &self.name,
            self.value.as_deref().unwrap_or_default(),
            &self.path,
            self.http_only,
            max_age,
        )
    }
}

impl fmt::Display for StructuredCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_set_cookie(
            f,
            &self.name,
            &self.value,
            &self.path,
            self.http_only,
            self.max_age.as_secs(),
        )
    }
}

/// A cookie as received from the client: just a name and a value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InboundCookie {
    name: String,
    value: String,
}

impl InboundCookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Parse one `name=value` pair from a `Cookie` header.
    ///
    /// The value keeps any further `=` and loses one pair of surrounding
    /// double quotes (RFC 6265 quoted `cookie-value`). Pairs without `=` or
    /// with an empty name yield `None`.
    #[must_use]
    pub fn parse_pair(pair: &str) -> Option<Self> {
        let (name, value) = pair.trim().split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let value = value.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|inner| inner.strip_suffix('"'))
            .unwrap_or(value);
        Some(Self::new(name, value))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

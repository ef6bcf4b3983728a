//! Trusted-device bypass token.
//!
//! Flow Overview: after a successful second-factor check the caller mints a
//! random token, binds it to the user with [`TrustedDeviceToken::new`] and
//! sends [`TrustedDeviceToken::to_structured_cookie`] back. On a later login
//! the inbound `2FA_ID_*` cookie is parsed with
//! [`TrustedDeviceToken::from_cookie`], checked with
//! [`TrustedDeviceToken::is_owned_by`], and its token compared against the
//! server-side record before the challenge is skipped.
//!
//! The part of the cookie name after `2FA_ID_` is the identity reference:
//! `hash(login)` for cookies minted here, the raw login for legacy cookies.
//! It is everything after the `2FA_ID` prefix and the `_` separator that
//! directly follows it, so logins containing underscores survive the round
//! trip.

mod cookie;
mod error;
pub mod headers;

pub use self::cookie::{InboundCookie, LegacyCookie, StructuredCookie};
pub use self::error::Error;

use self::cookie::CookieAttributes;
use crate::secrets::IdentityHasher;
use std::{fmt, time::Duration};

/// Cookie namespace shared by every trusted-device cookie ever issued.
pub const COOKIE_NAME_PREFIX: &str = "2FA_ID";

const COOKIE_NAME_SEPARATOR: char = '_';

/// How long a browser stays trusted.
pub const COOKIE_LIFETIME: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// Anything that can be identified by a login.
pub trait UserIdentity {
    fn login(&self) -> &str;
}

impl UserIdentity for str {
    fn login(&self) -> &str {
        self
    }
}

impl UserIdentity for String {
    fn login(&self) -> &str {
        self
    }
}

/// Returns the identity reference of a `2FA_ID_*` cookie name.
fn strip_cookie_prefix(name: &str) -> Option<&str> {
    name.strip_prefix(COOKIE_NAME_PREFIX)?
        .strip_prefix(COOKIE_NAME_SEPARATOR)
}

/// Syntactic check only; no hashing involved.
#[must_use]
pub fn is_two_factor_cookie(cookie: &InboundCookie) -> bool {
    is_two_factor_cookie_name(cookie.name())
}

#[must_use]
pub fn is_two_factor_cookie_name(name: &str) -> bool {
    strip_cookie_prefix(name).is_some()
}

/// A user identity bound to an opaque bypass token.
///
/// The token is carried through untouched. Instances are request-scoped and
/// never mutated after construction.
#[derive(Clone)]
pub struct TrustedDeviceToken<H> {
    identity_ref: String,
    token: String,
    cookie_path: String,
    hasher: H,
}

impl<H: IdentityHasher> TrustedDeviceToken<H> {
    /// Bind a freshly generated token to `user`.
    ///
    /// The login is hashed once here; cookies rendered later reuse it.
    ///
    /// # Errors
    /// Returns the hasher's error unchanged.
    pub fn new<U: UserIdentity + ?Sized>(
        user: &U,
        token: impl Into<String>,
        hasher: H,
        cookie_path: impl Into<String>,
    ) -> Result<Self, H::Error> {
        let identity_ref = hasher.hash(user.login())?;

        Ok(Self {
            identity_ref,
            token: token.into(),
            cookie_path: cookie_path.into(),
            hasher,
        })
    }

    /// Rebuild a token from an inbound cookie.
    ///
    /// The path is not sent back by browsers and stays empty.
    ///
    /// # Errors
    /// Returns [`Error::MalformedTokenCookie`] if the cookie is not a
    /// `2FA_ID_*` cookie or carries no identity reference.
    pub fn from_cookie(cookie: &InboundCookie, hasher: H) -> Result<Self, Error> {
        let identity_ref = strip_cookie_prefix(cookie.name())
            .filter(|identity_ref| !identity_ref.is_empty())
            .ok_or_else(|| Error::MalformedTokenCookie {
                name: cookie.name().to_string(),
            })?;

        Ok(Self {
            identity_ref: identity_ref.to_string(),
            token: cookie.value().to_string(),
            cookie_path: String::new(),
            hasher,
        })
    }

    /// Whether this cookie was issued to `user`.
    ///
    /// Makes exactly one `verify` call; raw and hashed references are told
    /// apart by the hasher alone.
    ///
    /// # Errors
    /// Returns the hasher's error unchanged.
    pub fn is_owned_by<U: UserIdentity + ?Sized>(&self, user: &U) -> Result<bool, H::Error> {
        self.hasher.verify(user.login(), &self.identity_ref)
    }
}

impl<H> TrustedDeviceToken<H> {
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub fn identity_ref(&self) -> &str {
        &self.identity_ref
    }

    #[must_use]
    pub fn cookie_path(&self) -> &str {
        &self.cookie_path
    }

    #[must_use]
    pub fn cookie_name(&self) -> String {
        format!(
            "{COOKIE_NAME_PREFIX}{COOKIE_NAME_SEPARATOR}{}",
            self.identity_ref
        )
    }

    fn attributes(&self) -> CookieAttributes {
        CookieAttributes {
            name: self.cookie_name(),
            path: self.cookie_path.clone(),
            http_only: true,
        }
    }

    /// Servlet-style cookie. An expiring cookie has no value and a zero age,
    /// which makes the browser drop it.
    #[must_use]
    pub fn to_legacy_cookie(&self, expiring: bool) -> LegacyCookie {
        if expiring {
            return LegacyCookie::new(self.attributes(), None, 0);
        }

        let max_age = i32::try_from(COOKIE_LIFETIME.as_secs()).unwrap_or(i32::MAX);
        LegacyCookie::new(self.attributes(), Some(self.token.clone()), max_age)
    }

    /// Response cookie. An expiring cookie carries an empty value and a zero
    /// duration.
    #[must_use]
    pub fn to_structured_cookie(&self, expiring: bool) -> StructuredCookie {
        if expiring {
            return StructuredCookie::new(self.attributes(), String::new(), Duration::ZERO);
        }

        StructuredCookie::new(self.attributes(), self.token.clone(), COOKIE_LIFETIME)
    }
}

impl<H> fmt::Debug for TrustedDeviceToken<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrustedDeviceToken")
            .field("identity_ref", &self.identity_ref)
            .field("token", &"[REDACTED]")
            .field("cookie_path", &self.cookie_path)
            .finish_non_exhaustive()
    }
}

//! `Cookie` / `Set-Cookie` helpers for request handlers.
//!
//! Several users can sign in from the same browser, so a request may carry
//! more than one `2FA_ID_*` cookie. Cookies are filtered syntactically first;
//! only trusted-device cookies are ever parsed or checked.

use axum::http::{
    header::{InvalidHeaderValue, COOKIE},
    HeaderMap, HeaderValue,
};
use tracing::{debug, instrument};

use super::{
    is_two_factor_cookie, InboundCookie, StructuredCookie, TrustedDeviceToken, UserIdentity,
};
use crate::secrets::IdentityHasher;

/// Every cookie sent with the request, across all `Cookie` headers.
///
/// Pairs are decoded one at a time, so a pair that is not UTF-8 is skipped
/// without hiding the other cookies of the same header.
#[must_use]
pub fn inbound_cookies(headers: &HeaderMap) -> Vec<InboundCookie> {
    headers
        .get_all(COOKIE)
        .iter()
        .flat_map(|value| value.as_bytes().split(|byte| *byte == b';'))
        .filter_map(|pair| std::str::from_utf8(pair).ok())
        .filter_map(InboundCookie::parse_pair)
        .collect()
}

/// Trusted-device cookies present on the request, parsed.
///
/// Malformed `2FA_ID_*` cookies are skipped as if absent.
#[instrument(skip_all)]
pub fn trusted_devices<H>(headers: &HeaderMap, hasher: H) -> Vec<TrustedDeviceToken<H>>
where
    H: IdentityHasher + Clone,
{
    inbound_cookies(headers)
        .iter()
        .filter(|cookie| is_two_factor_cookie(cookie))
        .filter_map(
            |cookie| match TrustedDeviceToken::from_cookie(cookie, hasher.clone()) {
                Ok(token) => Some(token),
                Err(err) => {
                    debug!("Ignoring trusted-device cookie: {err}");
                    None
                }
            },
        )
        .collect()
}

/// The first trusted-device cookie issued to `user`, if any.
///
/// Ownership is checked one cookie at a time and stops at the first match.
///
/// # Errors
/// Returns the hasher's error unchanged.
#[instrument(skip_all)]
pub fn find_owned_by<H, U>(
    headers: &HeaderMap,
    user: &U,
    hasher: H,
) -> Result<Option<TrustedDeviceToken<H>>, H::Error>
where
    H: IdentityHasher + Clone,
    U: UserIdentity + ?Sized,
{
    for token in trusted_devices(headers, hasher) {
        if token.is_owned_by(user)? {
            debug!("Found trusted-device cookie for user");
            return Ok(Some(token));
        }
    }

    debug!("No trusted-device cookie for user");
    Ok(None)
}

/// `Set-Cookie` value for a structured cookie.
///
/// # Errors
/// Returns an error if the cookie contains bytes not allowed in a header.
pub fn set_cookie_header(cookie: &StructuredCookie) -> Result<HeaderValue, InvalidHeaderValue> {
    cookie.to_header_value()
}

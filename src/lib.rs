//! # Trusted-device cookies
//!
//! A browser that passed the second-factor challenge can be remembered for a
//! bounded period (30 days) with a `2FA_ID_<identity>` cookie. On the next
//! login the server rebuilds a [`TrustedDeviceToken`] from that cookie, checks
//! it belongs to the user that just authenticated, and compares the opaque
//! token against its own record before skipping the challenge.
//!
//! ## Identity reference
//!
//! The cookie name never carries the plain login. Tokens minted by this crate
//! store `hash(login)` computed by an [`IdentityHasher`]; older cookies stored
//! the raw login. Both forms are opaque strings here, and only
//! [`IdentityHasher::verify`] decides whether a reference matches a login.
//!
//! ## Layout
//!
//! - [`twofactor`]: the token value object, its cookie representations and the
//!   `Cookie` / `Set-Cookie` header helpers.
//! - [`secrets`]: the hasher trait and the default keyed implementation.
//! - [`config`]: cookie scoping shared by issuers.
//! - [`cli`]: the `trusted-device` operator tool.

pub mod cli;
pub mod config;
pub mod secrets;
pub mod twofactor;

pub use config::TrustedDeviceConfig;
pub use secrets::{IdentityHasher, Secrets, SecretsError};
pub use twofactor::{
    is_two_factor_cookie, Error, InboundCookie, LegacyCookie, StructuredCookie,
    TrustedDeviceToken, UserIdentity, COOKIE_LIFETIME, COOKIE_NAME_PREFIX,
};

use crate::{
    cli::globals::GlobalArgs,
    secrets::IdentityHasher,
    twofactor::{is_two_factor_cookie, InboundCookie, TrustedDeviceToken},
};
use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, instrument};

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub cookie: SecretString,
    pub login: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Report {
    pub two_factor: bool,
    pub identity_ref: Option<String>,
    pub owned: Option<bool>,
}

/// Inspect `cookie` against `login`.
///
/// Ownership is only checked for well-formed trusted-device cookies.
///
/// # Errors
/// Returns the hasher's error unchanged.
pub fn inspect<H: IdentityHasher>(
    cookie: &InboundCookie,
    login: &str,
    hasher: H,
) -> Result<Report, H::Error> {
    if !is_two_factor_cookie(cookie) {
        return Ok(Report {
            two_factor: false,
            identity_ref: None,
            owned: None,
        });
    }

    match TrustedDeviceToken::from_cookie(cookie, hasher) {
        Ok(token) => Ok(Report {
            two_factor: true,
            identity_ref: Some(token.identity_ref().to_string()),
            owned: Some(token.is_owned_by(login)?),
        }),
        Err(err) => {
            debug!("Malformed trusted-device cookie: {err}");
            Ok(Report {
                two_factor: true,
                identity_ref: None,
                owned: None,
            })
        }
    }
}

/// Handle the inspect action
///
/// # Errors
/// Returns an error if the cookie is not `NAME=VALUE` or the secret is unusable.
#[instrument(skip_all)]
pub fn handle(args: Args) -> Result<String> {
    let cookie = InboundCookie::parse_pair(args.cookie.expose_secret())
        .context("cookie must be given as NAME=VALUE")?;
    let hasher = args.globals.hasher().context("invalid --secret")?;

    let report = inspect(&cookie, &args.login, &hasher)?;

    Ok(serde_json::to_string_pretty(&report)?)
}

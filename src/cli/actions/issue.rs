use crate::{cli::globals::GlobalArgs, twofactor::headers::set_cookie_header};
use anyhow::{Context, Result};
use rand::{distributions::Alphanumeric, rngs::OsRng, Rng};
use secrecy::{ExposeSecret, SecretString};
use tracing::{info, instrument};

const TOKEN_LENGTH: usize = 64;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub login: String,
    pub token: Option<SecretString>,
}

/// Random alphanumeric bypass token.
#[must_use]
pub fn generate_token() -> SecretString {
    let token: String = OsRng
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect();
    SecretString::from(token)
}

/// Handle the issue action
///
/// # Errors
/// Returns an error if the secret is unusable or the cookie is not a valid header.
#[instrument(skip_all)]
pub fn handle(args: Args) -> Result<String> {
    let hasher = args.globals.hasher().context("invalid --secret")?;
    let token = args.token.unwrap_or_else(generate_token);

    let issued = args
        .globals
        .config()
        .issue(args.login.as_str(), token.expose_secret(), &hasher)?;

    let header = set_cookie_header(&issued.to_structured_cookie(false))
        .context("cookie is not a valid Set-Cookie header")?;

    info!("Issued trusted-device cookie {}", issued.cookie_name());

    Ok(header.to_str()?.to_string())
}

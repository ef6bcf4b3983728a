use crate::{cli::globals::GlobalArgs, twofactor::headers::set_cookie_header};
use anyhow::{Context, Result};
use tracing::{info, instrument};

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub login: String,
}

/// Handle the revoke action
///
/// # Errors
/// Returns an error if the secret is unusable or the cookie is not a valid header.
#[instrument(skip_all)]
pub fn handle(args: Args) -> Result<String> {
    let hasher = args.globals.hasher().context("invalid --secret")?;

    // The token is irrelevant for a deletion; only name and path must match.
    let issued = args
        .globals
        .config()
        .issue(args.login.as_str(), String::new(), &hasher)?;

    let header = set_cookie_header(&issued.to_structured_cookie(true))
        .context("cookie is not a valid Set-Cookie header")?;

    info!("Revoked trusted-device cookie {}", issued.cookie_name());

    Ok(header.to_str()?.to_string())
}

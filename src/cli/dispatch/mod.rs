use crate::cli::{
    actions::{inspect, issue, revoke, Action},
    commands::{
        ARG_COOKIE, ARG_COOKIE_PATH, ARG_LOGIN, ARG_SECRET, ARG_TOKEN, CMD_INSPECT, CMD_ISSUE,
        CMD_REVOKE,
    },
    globals::GlobalArgs,
};
use anyhow::{anyhow, Context, Result};
use secrecy::SecretString;

fn required(matches: &clap::ArgMatches, id: &str) -> Result<String> {
    matches
        .get_one::<String>(id)
        .cloned()
        .with_context(|| format!("missing required argument: --{id}"))
}

fn globals(matches: &clap::ArgMatches) -> Result<GlobalArgs> {
    let secret = required(matches, ARG_SECRET)?;
    let globals = GlobalArgs::new(SecretString::from(secret));

    Ok(match matches.get_one::<String>(ARG_COOKIE_PATH) {
        Some(path) => globals.with_cookie_path(path.clone()),
        None => globals,
    })
}

/// # Errors
/// Returns an error if required arguments are missing or the subcommand is unknown.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let Some((name, sub_m)) = matches.subcommand() else {
        return Err(anyhow!("missing subcommand"));
    };

    // Global args are propagated down, so the subcommand sees every value.
    let globals = globals(sub_m)?;

    match name {
        CMD_ISSUE => Ok(Action::Issue(issue::Args {
            globals,
            login: required(sub_m, ARG_LOGIN)?,
            token: sub_m
                .get_one::<String>(ARG_TOKEN)
                .map(|token| SecretString::from(token.clone())),
        })),
        CMD_REVOKE => Ok(Action::Revoke(revoke::Args {
            globals,
            login: required(sub_m, ARG_LOGIN)?,
        })),
        CMD_INSPECT => Ok(Action::Inspect(inspect::Args {
            globals,
            cookie: SecretString::from(required(sub_m, ARG_COOKIE)?),
            login: required(sub_m, ARG_LOGIN)?,
        })),
        other => Err(anyhow!("unknown subcommand: {other}")),
    }
}

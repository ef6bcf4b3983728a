use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ArgAction, ColorChoice, Command,
};

pub const ARG_SECRET: &str = "secret";
pub const ARG_COOKIE_PATH: &str = "cookie-path";
pub const ARG_VERBOSITY: &str = "verbosity";
pub const ARG_LOGIN: &str = "login";
pub const ARG_TOKEN: &str = "token";
pub const ARG_COOKIE: &str = "cookie";

pub const CMD_ISSUE: &str = "issue";
pub const CMD_REVOKE: &str = "revoke";
pub const CMD_INSPECT: &str = "inspect";

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Accepts a level name or its index (`0..=5`), as counted by `-v` flags.
#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        let level = level.to_lowercase();
        LOG_LEVELS
            .iter()
            .position(|name| *name == level)
            .and_then(|index| u8::try_from(index).ok())
            .ok_or_else(|| "invalid log level".to_string())
    })
}

fn login_arg() -> Arg {
    Arg::new(ARG_LOGIN)
        .short('l')
        .long("login")
        .help("Login of the user the cookie belongs to")
        .required(true)
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("trusted-device")
        .about("Issue and inspect trusted-device 2FA cookies")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_SECRET)
                .short('s')
                .long("secret")
                .help("Key used to hash logins into cookie names")
                .env("TRUSTED_DEVICE_SECRET")
                .hide_env_values(true)
                .global(true),
        )
        .arg(
            Arg::new(ARG_COOKIE_PATH)
                .long("cookie-path")
                .help("Base path the cookie is scoped to")
                .default_value("/")
                .env("TRUSTED_DEVICE_COOKIE_PATH")
                .global(true),
        )
        .arg(
            Arg::new(ARG_VERBOSITY)
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("TRUSTED_DEVICE_LOG_LEVEL")
                .global(true)
                .action(ArgAction::Count)
                .value_parser(validator_log_level()),
        )
        .subcommand(
            Command::new(CMD_ISSUE)
                .about("Print a Set-Cookie header trusting this device for 30 days")
                .arg(login_arg())
                .arg(
                    Arg::new(ARG_TOKEN)
                        .short('t')
                        .long("token")
                        .help("Bypass token; 64 random alphanumeric characters when omitted"),
                ),
        )
        .subcommand(
            Command::new(CMD_REVOKE)
                .about("Print a Set-Cookie header deleting the trusted-device cookie")
                .arg(login_arg()),
        )
        .subcommand(
            Command::new(CMD_INSPECT)
                .about("Check whether a cookie is a trusted-device cookie owned by a user")
                .arg(
                    Arg::new(ARG_COOKIE)
                        .short('c')
                        .long("cookie")
                        .help("Inbound cookie as NAME=VALUE")
                        .required(true),
                )
                .arg(login_arg()),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "trusted-device");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("Issue and inspect trusted-device 2FA cookies".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_debug_assert() {
        new().debug_assert();
    }

    #[test]
    fn test_issue_args() {
        temp_env::with_vars(
            [
                ("TRUSTED_DEVICE_SECRET", None::<&str>),
                ("TRUSTED_DEVICE_COOKIE_PATH", None),
            ],
            || {
                let matches = new().get_matches_from(vec![
                    "trusted-device",
                    "--secret",
                    "s3cr3t",
                    "issue",
                    "--login",
                    "testUser",
                    "--token",
                    "abc",
                ]);

                let Some((name, sub_m)) = matches.subcommand() else {
                    panic!("subcommand expected");
                };
                assert_eq!(name, CMD_ISSUE);
                assert_eq!(
                    sub_m.get_one::<String>(ARG_SECRET).map(String::as_str),
                    Some("s3cr3t")
                );
                assert_eq!(
                    sub_m.get_one::<String>(ARG_COOKIE_PATH).map(String::as_str),
                    Some("/")
                );
                assert_eq!(
                    sub_m.get_one::<String>(ARG_LOGIN).map(String::as_str),
                    Some("testUser")
                );
                assert_eq!(
                    sub_m.get_one::<String>(ARG_TOKEN).map(String::as_str),
                    Some("abc")
                );
            },
        );
    }

    #[test]
    fn test_inspect_requires_cookie() {
        let result = new().try_get_matches_from(vec![
            "trusted-device",
            "inspect",
            "--login",
            "testUser",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("TRUSTED_DEVICE_SECRET", Some("from-env")),
                ("TRUSTED_DEVICE_COOKIE_PATH", Some("/extract-dev")),
                ("TRUSTED_DEVICE_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(vec![
                    "trusted-device",
                    "revoke",
                    "--login",
                    "testUser",
                ]);

                let Some((_, sub_m)) = matches.subcommand() else {
                    panic!("subcommand expected");
                };
                assert_eq!(
                    sub_m.get_one::<String>(ARG_SECRET).map(String::as_str),
                    Some("from-env")
                );
                assert_eq!(
                    sub_m.get_one::<String>(ARG_COOKIE_PATH).map(String::as_str),
                    Some("/extract-dev")
                );
                assert_eq!(matches.get_one::<u8>(ARG_VERBOSITY).copied(), Some(2));
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        for (index, &level) in LOG_LEVELS.iter().enumerate() {
            temp_env::with_vars([("TRUSTED_DEVICE_LOG_LEVEL", Some(level))], || {
                let matches = new().get_matches_from(vec![
                    "trusted-device",
                    "revoke",
                    "--login",
                    "testUser",
                ]);
                assert_eq!(
                    matches.get_one::<u8>(ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        for index in 0..LOG_LEVELS.len() {
            temp_env::with_vars([("TRUSTED_DEVICE_LOG_LEVEL", None::<String>)], || {
                let mut args = vec!["trusted-device".to_string()];

                // Add the appropriate number of "-v" flags based on the index
                if index > 0 {
                    args.push(format!("-{}", "v".repeat(index)));
                }
                args.extend(["revoke", "--login", "testUser"].map(String::from));

                let matches = new().get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>(ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }
}

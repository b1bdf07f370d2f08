pub mod logging;

use crate::api::{config::ENV_API_URL, types::ValidationLevel};
use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ArgAction, ColorChoice, Command,
};
use std::path::PathBuf;

pub const ARG_API_URL: &str = "api-url";
pub const ARG_STATE_DIR: &str = "state-dir";
pub const ARG_EMAIL: &str = "email";
pub const ARG_EMAILS: &str = "emails";
pub const ARG_FILE: &str = "file";
pub const ARG_LEVEL: &str = "level";
pub const ARG_TIMEOUT: &str = "timeout";
pub const ARG_POST: &str = "post";
pub const ARG_CREDENTIAL: &str = "credential";

#[must_use]
pub fn validator_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<ValidationLevel, String> {
        level.parse::<ValidationLevel>()
    })
}

fn with_validation_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_LEVEL)
                .short('l')
                .long("level")
                .help("Validation level: syntax, dns, smtp, full")
                .default_value("full")
                .value_parser(validator_level()),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .short('t')
                .long("timeout")
                .help("Per-address timeout in seconds, enforced by the service")
                .default_value("10")
                .value_parser(clap::value_parser!(u32).range(1..)),
        )
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("emailcheck")
        .about("Email validation client")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_API_URL)
                .long("api-url")
                .help("Validation API base URL, example: https://verify.example.com")
                .env(ENV_API_URL)
                .global(true),
        )
        .arg(
            Arg::new(ARG_STATE_DIR)
                .long("state-dir")
                .help("Directory holding the stored session (default: $HOME/.emailcheck)")
                .env("EMAILCHECK_STATE_DIR")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .subcommand(with_validation_args(
            Command::new("validate")
                .about("Validate a single email address")
                .arg(Arg::new(ARG_EMAIL).help("Email address").required(true))
                .arg(
                    Arg::new(ARG_POST)
                        .long("post")
                        .help("Send the address in a JSON body instead of the URL path")
                        .action(ArgAction::SetTrue),
                ),
        ))
        .subcommand(with_validation_args(
            Command::new("batch")
                .about("Validate several email addresses in one request")
                .arg(
                    Arg::new(ARG_EMAILS)
                        .help("Email addresses")
                        .num_args(0..)
                        .required_unless_present(ARG_FILE),
                )
                .arg(
                    Arg::new(ARG_FILE)
                        .short('f')
                        .long("file")
                        .help("Read addresses from a file, one per line ('#' starts a comment)")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        ))
        .subcommand(
            Command::new("check")
                .about("Quick validity check with a simplified result")
                .arg(Arg::new(ARG_EMAIL).help("Email address").required(true)),
        )
        .subcommand(Command::new("health").about("Check the validation service status"))
        .subcommand(
            Command::new("login")
                .about("Sign in with a Google identity credential (use '-' to read stdin)")
                .arg(
                    Arg::new(ARG_CREDENTIAL)
                        .help("Identity credential (JWT) returned by Google sign-in")
                        .env("EMAILCHECK_CREDENTIAL")
                        .hide_env_values(true)
                        .required(true),
                ),
        )
        .subcommand(Command::new("logout").about("Remove the stored session"))
        .subcommand(Command::new("whoami").about("Show the stored session"));

    logging::with_args(command)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "emailcheck");
        assert_eq!(
            command.get_about().unwrap().to_string(),
            "Email validation client"
        );
        assert_eq!(
            command.get_version().unwrap().to_string(),
            env!("CARGO_PKG_VERSION")
        );
    }

    #[test]
    fn test_debug_assert() {
        new().debug_assert();
    }

    #[test]
    fn test_validate_defaults() {
        temp_env::with_vars([("EMAILCHECK_LOG_LEVEL", None::<&str>)], || {
            let matches = new().get_matches_from(vec!["emailcheck", "validate", "a+b@example.com"]);
            let (name, sub_m) = matches.subcommand().unwrap();
            assert_eq!(name, "validate");
            assert_eq!(
                sub_m.get_one::<String>(ARG_EMAIL).map(String::as_str),
                Some("a+b@example.com")
            );
            assert_eq!(
                sub_m.get_one::<ValidationLevel>(ARG_LEVEL).copied(),
                Some(ValidationLevel::Full)
            );
            assert_eq!(sub_m.get_one::<u32>(ARG_TIMEOUT).copied(), Some(10));
            assert!(!sub_m.get_flag(ARG_POST));
        });
    }

    #[test]
    fn test_validate_level_and_timeout() {
        let matches = new().get_matches_from(vec![
            "emailcheck",
            "validate",
            "x@a.com",
            "--level",
            "SMTP",
            "-t",
            "5",
            "--post",
        ]);
        let (_, sub_m) = matches.subcommand().unwrap();
        assert_eq!(
            sub_m.get_one::<ValidationLevel>(ARG_LEVEL).copied(),
            Some(ValidationLevel::Smtp)
        );
        assert_eq!(sub_m.get_one::<u32>(ARG_TIMEOUT).copied(), Some(5));
        assert!(sub_m.get_flag(ARG_POST));
    }

    #[test]
    fn test_rejects_bad_level_and_zero_timeout() {
        assert!(new()
            .try_get_matches_from(vec!["emailcheck", "validate", "x@a.com", "-l", "mx"])
            .is_err());
        assert!(new()
            .try_get_matches_from(vec!["emailcheck", "validate", "x@a.com", "-t", "0"])
            .is_err());
    }

    #[test]
    fn test_batch_requires_emails_or_file() {
        assert!(new()
            .try_get_matches_from(vec!["emailcheck", "batch"])
            .is_err());

        let matches = new().get_matches_from(vec!["emailcheck", "batch", "x@a.com", "y@b.com"]);
        let (_, sub_m) = matches.subcommand().unwrap();
        let emails: Vec<&String> = sub_m.get_many::<String>(ARG_EMAILS).unwrap().collect();
        assert_eq!(emails, ["x@a.com", "y@b.com"]);

        let matches = new().get_matches_from(vec!["emailcheck", "batch", "-f", "list.txt"]);
        let (_, sub_m) = matches.subcommand().unwrap();
        assert_eq!(
            sub_m.get_one::<PathBuf>(ARG_FILE),
            Some(&PathBuf::from("list.txt"))
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                (ENV_API_URL, Some("https://verify.example.com")),
                ("EMAILCHECK_STATE_DIR", Some("/var/lib/emailcheck")),
                ("EMAILCHECK_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(vec!["emailcheck", "health"]);
                assert_eq!(
                    matches.get_one::<String>(ARG_API_URL).map(String::as_str),
                    Some("https://verify.example.com")
                );
                assert_eq!(
                    matches.get_one::<PathBuf>(ARG_STATE_DIR),
                    Some(&PathBuf::from("/var/lib/emailcheck"))
                );
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );
            },
        );
    }

    #[test]
    fn test_global_args_after_subcommand() {
        temp_env::with_vars([(ENV_API_URL, None::<&str>)], || {
            let matches = new().get_matches_from(vec![
                "emailcheck",
                "check",
                "x@a.com",
                "--api-url",
                "http://127.0.0.1:9000",
            ]);
            assert_eq!(
                matches.get_one::<String>(ARG_API_URL).map(String::as_str),
                Some("http://127.0.0.1:9000")
            );
        });
    }

    #[test]
    fn test_login_reads_credential_env() {
        temp_env::with_vars([("EMAILCHECK_CREDENTIAL", Some("h.p.s"))], || {
            let matches = new().get_matches_from(vec!["emailcheck", "login"]);
            let (_, sub_m) = matches.subcommand().unwrap();
            assert_eq!(
                sub_m.get_one::<String>(ARG_CREDENTIAL).map(String::as_str),
                Some("h.p.s")
            );
        });
    }

    #[test]
    fn test_check_log_level_env() {
        // loop cover all possible value_parse
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars([("EMAILCHECK_LOG_LEVEL", Some(level))], || {
                let matches = new().get_matches_from(vec!["emailcheck", "health"]);
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        for index in 0..5 {
            temp_env::with_vars([("EMAILCHECK_LOG_LEVEL", None::<String>)], || {
                let mut args = vec!["emailcheck".to_string(), "health".to_string()];

                if index > 0 {
                    args.push(format!("-{}", "v".repeat(index)));
                }

                let matches = new().get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }
}

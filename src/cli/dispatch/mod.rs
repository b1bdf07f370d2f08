//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to an `Action` plus the global settings every
//! action needs (API endpoint and session state directory).

use crate::api::{AppConfig, ValidationLevel, ValidationOptions};
use crate::cli::{
    actions::Action,
    commands::{
        ARG_API_URL, ARG_CREDENTIAL, ARG_EMAIL, ARG_EMAILS, ARG_FILE, ARG_LEVEL, ARG_POST,
        ARG_STATE_DIR, ARG_TIMEOUT,
    },
    globals::GlobalArgs,
};
use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use secrecy::SecretString;
use std::path::PathBuf;

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if the subcommand or a required argument is missing.
pub fn handler(matches: &ArgMatches) -> Result<(Action, GlobalArgs)> {
    let mut api = AppConfig::default();
    api.apply_override(matches.get_one::<String>(ARG_API_URL).map(String::as_str));

    let globals = GlobalArgs::new(api, matches.get_one::<PathBuf>(ARG_STATE_DIR).cloned());

    let action = match matches.subcommand() {
        Some(("validate", sub_m)) => Action::Validate {
            email: required_string(sub_m, ARG_EMAIL)?,
            options: validation_options(sub_m),
            post: sub_m.get_flag(ARG_POST),
        },
        Some(("batch", sub_m)) => Action::Batch {
            emails: sub_m
                .get_many::<String>(ARG_EMAILS)
                .map(|values| values.cloned().collect())
                .unwrap_or_default(),
            file: sub_m.get_one::<PathBuf>(ARG_FILE).cloned(),
            options: validation_options(sub_m),
        },
        Some(("check", sub_m)) => Action::Check {
            email: required_string(sub_m, ARG_EMAIL)?,
        },
        Some(("health", _)) => Action::Health,
        Some(("login", sub_m)) => Action::Login {
            credential: SecretString::from(required_string(sub_m, ARG_CREDENTIAL)?),
        },
        Some(("logout", _)) => Action::Logout,
        Some(("whoami", _)) => Action::Whoami,
        Some((name, _)) => return Err(anyhow!("unknown subcommand: {name}")),
        None => return Err(anyhow!("missing subcommand")),
    };

    Ok((action, globals))
}

fn required_string(matches: &ArgMatches, id: &str) -> Result<String> {
    matches
        .get_one::<String>(id)
        .cloned()
        .with_context(|| format!("missing required argument: {id}"))
}

fn validation_options(matches: &ArgMatches) -> ValidationOptions {
    let defaults = ValidationOptions::default();
    ValidationOptions::new(
        matches
            .get_one::<ValidationLevel>(ARG_LEVEL)
            .copied()
            .unwrap_or(defaults.level),
        matches
            .get_one::<u32>(ARG_TIMEOUT)
            .copied()
            .unwrap_or(defaults.timeout),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{api::config::ENV_API_URL, cli::commands};
    use secrecy::ExposeSecret;

    fn dispatch(args: &[&str]) -> (Action, GlobalArgs) {
        let matches = commands::new().get_matches_from(args);
        handler(&matches).unwrap()
    }

    #[test]
    fn test_validate_action() {
        let (action, _) = dispatch(&["emailcheck", "validate", "x@a.com", "-l", "dns", "-t", "3"]);
        match action {
            Action::Validate {
                email,
                options,
                post,
            } => {
                assert_eq!(email, "x@a.com");
                assert_eq!(options, ValidationOptions::new(ValidationLevel::Dns, 3));
                assert!(!post);
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn test_batch_action_keeps_order() {
        let (action, _) = dispatch(&["emailcheck", "batch", "y@b.com", "x@a.com"]);
        match action {
            Action::Batch {
                emails,
                file,
                options,
            } => {
                assert_eq!(emails, ["y@b.com", "x@a.com"]);
                assert!(file.is_none());
                assert_eq!(options, ValidationOptions::default());
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn test_login_action_wraps_credential() {
        let (action, _) = dispatch(&["emailcheck", "login", "h.p.s"]);
        match action {
            Action::Login { credential } => assert_eq!(credential.expose_secret(), "h.p.s"),
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn test_globals_from_args() {
        temp_env::with_vars(
            [(ENV_API_URL, None::<&str>), ("EMAILCHECK_STATE_DIR", None)],
            || {
                let (action, globals) = dispatch(&[
                    "emailcheck",
                    "health",
                    "--api-url",
                    "https://verify.example.com",
                    "--state-dir",
                    "/tmp/emailcheck",
                ]);
                assert!(matches!(action, Action::Health));
                assert_eq!(globals.api.api_base_url, "https://verify.example.com");
                assert_eq!(globals.state_dir, PathBuf::from("/tmp/emailcheck"));
            },
        );
    }

    #[test]
    fn test_globals_default_api_url() {
        temp_env::with_vars([(ENV_API_URL, None::<&str>)], || {
            let (_, globals) = dispatch(&["emailcheck", "whoami"]);
            assert_eq!(globals.api, AppConfig::default());
        });
    }
}

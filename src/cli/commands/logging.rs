//! Log verbosity argument. Accepts a repeated `-v` or, through
//! `EMAILCHECK_LOG_LEVEL`, a level name or number.

use clap::{builder::ValueParser, Arg, ArgAction, Command};

pub const ARG_VERBOSITY: &str = "verbosity";
pub const ENV_LOG_LEVEL: &str = "EMAILCHECK_LOG_LEVEL";

/// Highest numeric level accepted; anything above 4 already means TRACE.
const MAX_NUMERIC_LEVEL: u8 = 5;

#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        let level = level.trim();
        if let Ok(parsed) = level.parse::<u8>() {
            return if parsed <= MAX_NUMERIC_LEVEL {
                Ok(parsed)
            } else {
                Err(format!("log level out of range: {parsed} (0-{MAX_NUMERIC_LEVEL})"))
            };
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            other => Err(format!(
                "invalid log level: {other} (expected error, warn, info, debug or trace)"
            )),
        }
    })
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
            .env(ENV_LOG_LEVEL)
            .global(true)
            .action(ArgAction::Count)
            .value_parser(validator_log_level()),
    )
}

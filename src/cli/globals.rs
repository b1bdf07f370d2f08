use crate::api::AppConfig;
use std::{env, path::PathBuf};

/// Directory name used for session state under `$HOME`.
pub const STATE_DIR_NAME: &str = ".emailcheck";

#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub api: AppConfig,
    pub state_dir: PathBuf,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api: AppConfig, state_dir: Option<PathBuf>) -> Self {
        Self {
            api,
            state_dir: state_dir.unwrap_or_else(default_state_dir),
        }
    }
}

/// `$HOME/.emailcheck`, or `.emailcheck` in the working directory without `HOME`.
#[must_use]
pub fn default_state_dir() -> PathBuf {
    env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map_or_else(
            || PathBuf::from(STATE_DIR_NAME),
            |home| PathBuf::from(home).join(STATE_DIR_NAME),
        )
}

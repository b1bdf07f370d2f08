pub mod session;
pub mod validate;

use crate::{api::ValidationOptions, cli::globals::GlobalArgs};
use anyhow::Result;
use secrecy::SecretString;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Action {
    Validate {
        email: String,
        options: ValidationOptions,
        post: bool,
    },
    Batch {
        emails: Vec<String>,
        file: Option<PathBuf>,
        options: ValidationOptions,
    },
    Check {
        email: String,
    },
    Health,
    Login {
        credential: SecretString,
    },
    Logout,
    Whoami,
}

impl Action {
    /// Execute the action.
    ///
    /// # Errors
    /// Returns an error if the API call fails or the session cannot be updated.
    pub async fn execute(self, globals: &GlobalArgs) -> Result<()> {
        match self {
            Self::Validate { .. } | Self::Batch { .. } | Self::Check { .. } | Self::Health => {
                validate::handle(self, globals).await
            }
            Self::Login { .. } | Self::Logout | Self::Whoami => session::handle(self, globals),
        }
    }
}

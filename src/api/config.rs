//! Runtime configuration for the validation API endpoint. The base URL is read
//! once from `EMAILCHECK_API_URL` and can be overridden by the caller (the CLI
//! passes `--api-url`). Configuration values are public; do not store secrets
//! here.

use super::errors::ApiError;
use std::env;
use url::Url;

/// Environment variable holding the API base URL override.
pub const ENV_API_URL: &str = "EMAILCHECK_API_URL";
/// Base URL used when no override is present: the backend's development bind.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl AppConfig {
    /// Loads config from the environment, falling back to the default base URL.
    #[must_use]
    pub fn load() -> Self {
        let mut config = Self::default();
        config.apply_override(env::var(ENV_API_URL).ok().as_deref());
        config
    }

    /// Replaces the base URL when `value` is present and not blank.
    pub fn apply_override(&mut self, value: Option<&str>) {
        if let Some(value) = value.and_then(normalize_value) {
            self.api_base_url = value;
        }
    }

    /// Checks that the base URL is an absolute http(s) URL.
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the URL cannot be parsed or uses another scheme.
    pub fn validate(&self) -> Result<(), ApiError> {
        let url = Url::parse(&self.api_base_url)
            .map_err(|err| ApiError::Config(format!("invalid API base URL: {err}")))?;

        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(ApiError::Config(format!(
                    "unsupported API base URL scheme: {scheme}"
                )))
            }
        }

        if url.host().is_none() {
            return Err(ApiError::Config(
                "invalid API base URL: no host specified".to_string(),
            ));
        }

        Ok(())
    }
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

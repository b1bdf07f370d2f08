//! HTTP client for the validation service. Every operation follows the same
//! shape: build the URL, send, check for a 2xx status, then return the parsed
//! JSON body or an operation-specific error. Email addresses are personal data
//! and are kept out of spans and log lines.

use super::{
    config::AppConfig,
    errors::{ApiError, Operation},
    types::{BatchValidationRequest, EmailValidationRequest, ValidationOptions},
};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use tracing::{debug, info_span, warn, Instrument};

/// Maximum number of error body characters kept on a `Request` error.
const MAX_ERROR_CHARS: usize = 200;

const VALIDATE_PATH: &str = "/api/v1/validate";
const BATCH_PATH: &str = "/api/v1/validate/batch";
const CHECK_PATH: &str = "/api/v1/check";
const HEALTH_PATH: &str = "/api/v1/health";

#[derive(Clone, Debug)]
pub struct ValidationClient {
    client: Client,
    base_url: String,
}

impl ValidationClient {
    /// Builds a client for the configured base URL.
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the base URL is invalid, or `ApiError::Network`
    /// if the HTTP client cannot be initialized.
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        config.validate()?;

        let client = Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .build()
            .map_err(ApiError::Network)?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
        })
    }

    /// Builds a client from `EMAILCHECK_API_URL` (or the default base URL).
    ///
    /// # Errors
    /// Same as [`ValidationClient::new`].
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(&AppConfig::load())
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Validates a single address via `GET /api/v1/validate/{email}`.
    ///
    /// # Errors
    /// `ApiError::Request` on a non-2xx status, `ApiError::Network` on transport
    /// failure, `ApiError::Decode` if a 2xx body is not JSON.
    pub async fn validate_email(
        &self,
        email: &str,
        options: ValidationOptions,
    ) -> Result<Value, ApiError> {
        let path = format!(
            "{}?level={}&timeout={}",
            email_path(VALIDATE_PATH, email),
            options.level,
            options.timeout
        );
        let request = self.client.get(self.url(&path));

        send_json(Operation::Validate, "GET", request).await
    }

    /// Validates a single address via the body-based `POST /api/v1/validate`.
    ///
    /// # Errors
    /// Same as [`ValidationClient::validate_email`].
    pub async fn validate_email_post(
        &self,
        email: &str,
        options: ValidationOptions,
    ) -> Result<Value, ApiError> {
        let body = EmailValidationRequest {
            email,
            level: options.level,
            timeout: options.timeout,
        };
        let request = self.client.post(self.url(VALIDATE_PATH)).json(&body);

        send_json(Operation::Validate, "POST", request).await
    }

    /// Validates many addresses in one `POST /api/v1/validate/batch` call.
    /// Address order is preserved in the request body.
    ///
    /// # Errors
    /// Same as [`ValidationClient::validate_email`], with the batch failure message.
    pub async fn validate_batch<S: AsRef<str>>(
        &self,
        emails: &[S],
        options: ValidationOptions,
    ) -> Result<Value, ApiError> {
        let body = BatchValidationRequest {
            emails: emails.iter().map(AsRef::as_ref).collect(),
            level: options.level,
            timeout: options.timeout,
        };
        debug!(count = body.emails.len(), level = %options.level, "sending batch validation");

        let request = self.client.post(self.url(BATCH_PATH)).json(&body);

        send_json(Operation::ValidateBatch, "POST", request).await
    }

    /// Runs the simplified `GET /api/v1/check/{email}` lookup.
    ///
    /// # Errors
    /// Same as [`ValidationClient::validate_email`].
    pub async fn quick_check(&self, email: &str) -> Result<Value, ApiError> {
        let request = self.client.get(self.url(&email_path(CHECK_PATH, email)));

        send_json(Operation::QuickCheck, "GET", request).await
    }

    /// Fetches `GET /api/v1/health`.
    ///
    /// # Errors
    /// `ApiError::Request` (reported as service unavailable) on a non-2xx status,
    /// otherwise as [`ValidationClient::validate_email`].
    pub async fn health_check(&self) -> Result<Value, ApiError> {
        let request = self.client.get(self.url(HEALTH_PATH));

        send_json(Operation::Health, "GET", request).await
    }

    fn url(&self, path: &str) -> String {
        build_url_with_base(&self.base_url, path)
    }
}

/// Appends the percent-encoded email as the last path segment.
fn email_path(prefix: &str, email: &str) -> String {
    format!("{prefix}/{}", urlencoding::encode(email))
}

/// Joins a validated base URL and a path with exactly one slash between them.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    format!("{}/{}", base, path.trim().trim_start_matches('/'))
}

async fn send_json(
    operation: Operation,
    method: &'static str,
    request: RequestBuilder,
) -> Result<Value, ApiError> {
    let span = info_span!(
        "emailcheck.request",
        %operation,
        http.method = method
    );

    async move {
        let response = request.send().await.map_err(|err| {
            // reqwest errors embed the request URL, and the URL carries the address
            warn!(
                connect = err.is_connect(),
                timeout = err.is_timeout(),
                "request failed before a response was received"
            );
            ApiError::Network(err)
        })?;

        handle_json_response(operation, response).await
    }
    .instrument(span)
    .await
}

/// Parses JSON responses and surfaces HTTP errors with sanitized bodies.
async fn handle_json_response(operation: Operation, response: Response) -> Result<Value, ApiError> {
    let status = response.status();

    if status.is_success() {
        debug!(status = status.as_u16(), "request succeeded");
        response.json::<Value>().await.map_err(ApiError::Decode)
    } else {
        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "{}", operation.failure_message());

        Err(ApiError::Request {
            operation,
            status: status.as_u16(),
            detail: sanitize_body(&body),
        })
    }
}

/// Trims and truncates an error body; empty bodies get a generic message.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}

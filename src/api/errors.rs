use std::fmt;
use thiserror::Error;

/// The client operation a request belongs to. Each one reports failures with
/// its own message so callers can tell a failed lookup from an outage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Validate,
    ValidateBatch,
    QuickCheck,
    Health,
}

impl Operation {
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Validate | Self::QuickCheck => "validation failed",
            Self::ValidateBatch => "batch validation failed",
            Self::Health => "service unavailable",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validate => "validate",
            Self::ValidateBatch => "validate_batch",
            Self::QuickCheck => "quick_check",
            Self::Health => "health_check",
        };
        formatter.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// The service answered with a non-2xx status. `detail` keeps a sanitized
    /// copy of the response body for diagnostics.
    #[error("{}: {status}", .operation.failure_message())]
    Request {
        operation: Operation,
        status: u16,
        detail: String,
    },
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("failed to decode response: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("config error: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status carried by a `Request` error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}

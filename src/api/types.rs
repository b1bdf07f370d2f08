//! Request payloads and optional typed views over validation responses. The
//! client operations return raw JSON; these views exist for callers (like the
//! CLI) that want to summarize a result and must tolerate bodies that do not
//! match.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Default per-address timeout (seconds) forwarded to the service.
pub const DEFAULT_TIMEOUT_SECS: u32 = 10;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationLevel {
    Syntax,
    Dns,
    Smtp,
    #[default]
    Full,
}

impl ValidationLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Syntax => "syntax",
            Self::Dns => "dns",
            Self::Smtp => "smtp",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for ValidationLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for ValidationLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "syntax" => Ok(Self::Syntax),
            "dns" => Ok(Self::Dns),
            "smtp" => Ok(Self::Smtp),
            "full" => Ok(Self::Full),
            other => Err(format!(
                "invalid validation level: {other} (expected syntax, dns, smtp or full)"
            )),
        }
    }
}

/// Level and timeout shared by the validation calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidationOptions {
    pub level: ValidationLevel,
    pub timeout: u32,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            level: ValidationLevel::Full,
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ValidationOptions {
    #[must_use]
    pub const fn new(level: ValidationLevel, timeout: u32) -> Self {
        Self { level, timeout }
    }
}

/// Body of `POST /api/v1/validate`.
#[derive(Clone, Debug, Serialize)]
pub struct EmailValidationRequest<'a> {
    pub email: &'a str,
    pub level: ValidationLevel,
    pub timeout: u32,
}

/// Body of `POST /api/v1/validate/batch`. Field order is part of the wire
/// contract: `emails`, `level`, `timeout`.
#[derive(Clone, Debug, Serialize)]
pub struct BatchValidationRequest<'a> {
    pub emails: Vec<&'a str>,
    pub level: ValidationLevel,
    pub timeout: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Invalid,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Invalid => "invalid",
        };
        formatter.write_str(value)
    }
}

/// Full validation result. Per-stage sections are kept as raw JSON.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EmailValidationResult {
    pub email: String,
    pub valid: bool,
    pub risk_level: RiskLevel,
    pub score: u8,
    pub message: String,
    pub validation_time_ms: u64,
    #[serde(default)]
    pub syntax: Option<serde_json::Value>,
    #[serde(default)]
    pub dns: Option<serde_json::Value>,
    #[serde(default)]
    pub smtp: Option<serde_json::Value>,
    #[serde(default)]
    pub deep_analysis: Option<serde_json::Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchValidationResult {
    pub total: usize,
    pub valid_count: usize,
    pub invalid_count: usize,
    pub results: Vec<EmailValidationResult>,
}

/// Simplified result returned by `/api/v1/check/{email}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuickCheckResult {
    pub email: String,
    pub valid: bool,
    pub score: u8,
    pub risk: RiskLevel,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub message: String,
}

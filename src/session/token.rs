//! Payload decoding for identity credentials (JWTs issued by Google Identity
//! Services). The signature is NOT verified here; only the backend may treat
//! these claims as trusted.

use base64ct::{Base64, Base64Unpadded, Encoding};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid token format")]
    TokenFormat,
    #[error("invalid base64 encoding")]
    Base64,
    #[error("payload is not valid UTF-8")]
    Utf8,
    #[error("invalid json")]
    Json(#[from] serde_json::Error),
}

/// Identity claims read from the credential payload.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct IdentityClaims {
    pub sub: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub picture: String,
}

/// Decodes the payload segment of `credential` into a JSON value.
///
/// # Errors
/// Returns a `TokenError` if there is no payload segment, the segment is not
/// base64, the bytes are not UTF-8, or the text is not JSON.
pub fn decode_payload(credential: &str) -> Result<Value, TokenError> {
    let text = payload_text(credential)?;
    Ok(serde_json::from_str(&text)?)
}

/// Decodes the payload segment of `credential` into identity claims.
///
/// # Errors
/// Same as [`decode_payload`], plus a JSON error if `sub` or `email` is missing.
pub fn decode_claims(credential: &str) -> Result<IdentityClaims, TokenError> {
    let payload = decode_payload(credential)?;
    Ok(serde_json::from_value(payload)?)
}

fn payload_text(credential: &str) -> Result<String, TokenError> {
    let segment = credential.split('.').nth(1).ok_or(TokenError::TokenFormat)?;
    if segment.is_empty() {
        return Err(TokenError::TokenFormat);
    }

    let base64 = segment.replace('-', "+").replace('_', "/");
    let bytes = if base64.ends_with('=') {
        Base64::decode_vec(&base64)
    } else {
        Base64Unpadded::decode_vec(&base64)
    }
    .map_err(|_| TokenError::Base64)?;

    String::from_utf8(bytes).map_err(|_| TokenError::Utf8)
}

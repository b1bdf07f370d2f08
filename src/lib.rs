//! # emailcheck (Email Validation Client)
//!
//! `emailcheck` is the client-side integration layer of the email validation
//! service. It wraps the remote validation API and keeps a local identity
//! session derived from Google identity credentials.
//!
//! ## Validation API
//!
//! [`api::ValidationClient`] issues requests against a configurable base URL
//! (`EMAILCHECK_API_URL`). Response bodies are passed through as JSON; the
//! remote service owns the meaning of every field. Non-2xx responses surface as
//! [`api::ApiError::Request`] carrying the HTTP status.
//!
//! ## Identity Session
//!
//! [`session::SessionStore`] holds the signed-in user in observable cells and
//! mirrors a non-secret subset of it to durable key-value storage. The identity
//! credential is decoded **without** signature verification: the backend is the
//! trust boundary and must re-verify the credential before using any identity
//! claim for authorization. The raw credential is never persisted.

pub mod api;
pub mod cli;
pub mod session;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

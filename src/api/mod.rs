//! Validation service API: client, configuration, errors and wire types.
//!
//! | Operation | Method | Path |
//! |---|---|---|
//! | `validate_email` | GET | `/api/v1/validate/{email}?level=&timeout=` |
//! | `validate_email_post` | POST | `/api/v1/validate` |
//! | `validate_batch` | POST | `/api/v1/validate/batch` |
//! | `quick_check` | GET | `/api/v1/check/{email}` |
//! | `health_check` | GET | `/api/v1/health` |
//!
//! No input validation happens here; the service owns email syntax checking.
//! Nothing is retried.

pub mod client;
pub mod config;
pub mod errors;
pub mod types;

pub use client::ValidationClient;
pub use config::AppConfig;
pub use errors::{ApiError, Operation};
pub use types::{ValidationLevel, ValidationOptions};

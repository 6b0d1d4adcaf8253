//! Settings validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0)
//! - Check the API base URL is usable
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: Settings → Result<(), Vec<ValidationError>>

use thiserror::Error;
use url::Url;

use crate::config::schema::Settings;

/// A single semantic settings error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

/// Validate loaded settings.
pub fn validate_settings(settings: &Settings) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&settings.api.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError {
            field: "api.base_url",
            message: format!("unsupported scheme '{}'", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError {
            field: "api.base_url",
            message: e.to_string(),
        }),
    }

    if settings.api.request_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "api.request_timeout_secs",
            message: "must be greater than 0".to_string(),
        });
    }

    if settings.api.connect_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "api.connect_timeout_secs",
            message: "must be greater than 0".to_string(),
        });
    }

    if settings.observability.log_level.trim().is_empty() {
        errors.push(ValidationError {
            field: "observability.log_level",
            message: "must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

//! Server settings validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate address syntax, timeouts and the redirect URL
//! - Reject an enabled admin API without a key
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Runs before any listener is bound

use std::fmt;

use crate::config::schema::ServerConfig;
use crate::net::is_valid_address;

/// A single settings problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub fn validate_settings(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !is_valid_address(&config.listener.bind_address) {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("invalid address {:?}", config.listener.bind_address),
        ));
    }
    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "listener.request_timeout_secs",
            "must be greater than zero",
        ));
    }

    match url::Url::parse(&config.redirect.docs_url) {
        Ok(u) if matches!(u.scheme(), "http" | "https") && u.has_host() => {}
        _ => errors.push(ValidationError::new(
            "redirect.docs_url",
            format!("not an absolute http(s) URL: {:?}", config.redirect.docs_url),
        )),
    }

    if config.reload.poll_interval_ms == 0 {
        errors.push(ValidationError::new(
            "reload.poll_interval_ms",
            "must be greater than zero",
        ));
    }

    if config.admin.enabled {
        if config.admin.api_key.is_empty() {
            errors.push(ValidationError::new(
                "admin.api_key",
                "required when the admin API is enabled",
            ));
        }
        if !is_valid_address(&config.admin.bind_address) {
            errors.push(ValidationError::new(
                "admin.bind_address",
                format!("invalid address {:?}", config.admin.bind_address),
            ));
        }
    }

    if let Some(addr) = &config.observability.metrics_address {
        if !is_valid_address(addr) {
            errors.push(ValidationError::new(
                "observability.metrics_address",
                format!("invalid address {:?}", addr),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

//! Server settings loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::ServerConfig;
use crate::config::validation::{validate_settings, ValidationError};

/// Error type for settings loading.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load settings from a TOML file without validating them.
///
/// Validation is left to the caller so CLI overrides can be applied first.
pub fn load_settings(path: &Path) -> Result<ServerConfig, SettingsError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Validate, mapping the error list into a [`SettingsError`].
pub fn check(config: &ServerConfig) -> Result<(), SettingsError> {
    validate_settings(config).map_err(SettingsError::Validation)
}

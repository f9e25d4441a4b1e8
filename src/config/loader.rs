//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::TransferConfig;
use crate::config::validation::ValidationError;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("Environment variable {0} not set")]
    MissingEnv(&'static str),

    #[error("Environment variable {name} is invalid: {reason}")]
    InvalidEnv { name: &'static str, reason: String },
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from a TOML file.
///
/// The result is not validated: CLI overrides still have to be applied, and
/// the caller runs [`crate::config::validate_config`] on the merged result.
pub fn load_config(path: &Path) -> Result<TransferConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: TransferConfig = toml::from_str(&content)?;

    tracing::debug!(path = %path.display(), "Configuration file loaded");
    Ok(config)
}

/// Load the configuration file if one is given, defaults otherwise.
/// Unvalidated, like [`load_config`].
pub fn load_or_default(path: Option<&Path>) -> Result<TransferConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(TransferConfig::default()),
    }
}

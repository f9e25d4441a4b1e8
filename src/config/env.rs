//! Environment-provided settings.
//!
//! Secrets and per-run targets come from the process environment, optionally
//! seeded from a `.env` file in the working directory.

use alloy::primitives::Address;
use std::path::PathBuf;

use crate::config::loader::ConfigError;

/// Node provider project identifier.
pub const PROJECT_ID_ENV_VAR: &str = "INFURA_PROJECT_ID";

/// Hex-encoded private key of the sending account.
pub const PRIVATE_KEY_ENV_VAR: &str = "PRIVATE_KEY_HEX";

/// Address receiving the transfer.
pub const RECIPIENT_ENV_VAR: &str = "RECIPIENT_ADDRESS";

/// Result of looking for a `.env` file.
#[derive(Debug)]
pub enum DotenvOutcome {
    Loaded(PathBuf),
    NotFound,
    Unreadable(String),
}

impl DotenvOutcome {
    /// Report the outcome. Called once logging is up, which happens after
    /// `.env` is read so that `RUST_LOG` may come from the file.
    pub fn log(&self) {
        match self {
            DotenvOutcome::Loaded(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
            DotenvOutcome::NotFound => tracing::debug!("No .env file found"),
            DotenvOutcome::Unreadable(e) => tracing::warn!(error = %e, "Ignoring unreadable .env file"),
        }
    }
}

/// Load variables from `.env` into the process environment.
///
/// Variables already set in the environment are not overwritten. A missing
/// or malformed file is not fatal.
pub fn load_dotenv() -> DotenvOutcome {
    match dotenv::dotenv() {
        Ok(path) => DotenvOutcome::Loaded(path),
        Err(dotenv::Error::Io(_)) => DotenvOutcome::NotFound,
        Err(e) => DotenvOutcome::Unreadable(e.to_string()),
    }
}

/// Non-secret values read from the environment.
///
/// The private key is read separately by
/// [`crate::blockchain::Wallet::from_env`].
#[derive(Debug, Clone, Default)]
pub struct EnvSettings {
    /// Provider project id, if set.
    pub project_id: Option<String>,
    /// Recipient address, if set.
    pub recipient: Option<Address>,
}

impl EnvSettings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let project_id = read_var(PROJECT_ID_ENV_VAR);
        let recipient = read_var(RECIPIENT_ENV_VAR)
            .map(|raw| parse_address(RECIPIENT_ENV_VAR, &raw))
            .transpose()?;

        Ok(Self {
            project_id,
            recipient,
        })
    }

    /// The recipient, or an error naming the variable to set.
    pub fn require_recipient(&self) -> Result<Address, ConfigError> {
        self.recipient.ok_or(ConfigError::MissingEnv(RECIPIENT_ENV_VAR))
    }
}

fn read_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a hex address, attributing failures to the named variable.
pub fn parse_address(name: &'static str, raw: &str) -> Result<Address, ConfigError> {
    raw.trim().parse().map_err(|e| ConfigError::InvalidEnv {
        name,
        reason: format!("'{}' is not an address: {}", raw, e),
    })
}

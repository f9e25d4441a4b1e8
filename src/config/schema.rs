//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for a transfer.
//! All types derive Serde traits for deserialization from config files.
//! Secrets (private key, provider project id) are never part of the schema;
//! they come from the environment, see [`crate::config::env`].

use serde::{Deserialize, Serialize};

use crate::config::env::PROJECT_ID_ENV_VAR;
use crate::config::loader::ConfigError;

/// Sepolia testnet chain id.
pub const SEPOLIA_CHAIN_ID: u64 = 11_155_111;

/// Gas consumed by a plain native-currency transfer.
pub const TRANSFER_GAS: u64 = 21_000;

/// Root configuration for the transfer tool.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TransferConfig {
    /// Node provider and chain settings.
    pub network: NetworkConfig,

    /// Amount and gas settings for the transfer.
    pub transfer: TransferSettings,

    /// Receipt polling settings.
    pub confirmation: ConfirmationConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Node provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Network name substituted into the provider template (e.g. "sepolia").
    pub name: String,

    /// Explicit JSON-RPC endpoint. Takes precedence over the template.
    pub rpc_url: Option<String>,

    /// Hosted provider URL with `{network}` and `{project_id}` placeholders.
    pub provider_url_template: String,

    /// Failover JSON-RPC endpoint URLs.
    pub failover_urls: Vec<String>,

    /// Expected chain id. `None` accepts whatever the node reports.
    pub chain_id: Option<u64>,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            name: "sepolia".to_string(),
            rpc_url: None,
            provider_url_template: "https://{network}.infura.io/v3/{project_id}".to_string(),
            failover_urls: Vec::new(),
            chain_id: Some(SEPOLIA_CHAIN_ID),
            rpc_timeout_secs: 10,
        }
    }
}

impl NetworkConfig {
    /// Resolve the primary JSON-RPC endpoint.
    ///
    /// An explicit `rpc_url` wins; otherwise the provider template is filled
    /// in with the network name and the project id.
    pub fn resolve_rpc_url(&self, project_id: Option<&str>) -> Result<String, ConfigError> {
        if let Some(url) = &self.rpc_url {
            return Ok(url.clone());
        }

        let project_id = project_id
            .filter(|id| !id.trim().is_empty())
            .ok_or(ConfigError::MissingEnv(PROJECT_ID_ENV_VAR))?;

        Ok(self
            .provider_url_template
            .replace("{network}", &self.name)
            .replace("{project_id}", project_id.trim()))
    }
}

/// Transfer amount and gas settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransferSettings {
    /// Amount to send, in Wei.
    pub amount_wei: u64,

    /// Gas limit for the transaction.
    pub gas_limit: u64,

    /// Gas price multiplier (1.0 = node suggestion, 1.2 = 20% buffer).
    pub gas_price_multiplier: f64,

    /// Maximum gas price in gwei (protection against spikes).
    pub max_gas_price_gwei: u64,
}

impl Default for TransferSettings {
    fn default() -> Self {
        Self {
            amount_wei: 10_000_000_000_000_000, // 0.01 ETH
            gas_limit: TRANSFER_GAS,
            gas_price_multiplier: 1.0,
            max_gas_price_gwei: 500,
        }
    }
}

/// Receipt polling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfirmationConfig {
    /// Fixed delay between receipt lookups in milliseconds.
    pub poll_interval_ms: u64,

    /// Give up waiting after this many seconds. 0 waits until interrupted.
    pub timeout_secs: u64,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            timeout_secs: 0,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

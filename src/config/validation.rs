//! Configuration validation.
//!
//! Serde handles syntax; this checks value ranges and URL shapes.
//! Validation is a pure function over [`TransferConfig`] and reports every
//! problem found, not just the first.

use thiserror::Error;

use crate::config::schema::{TransferConfig, TRANSFER_GAS};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("network.name must not be empty")]
    EmptyNetworkName,

    #[error("network.rpc_timeout_secs must be greater than zero")]
    ZeroRpcTimeout,

    #[error("network.rpc_url '{url}' is not a valid URL: {reason}")]
    InvalidRpcUrl { url: String, reason: String },

    #[error("network.failover_urls entry '{url}' is not a valid URL: {reason}")]
    InvalidFailoverUrl { url: String, reason: String },

    #[error("network.provider_url_template must contain {{project_id}} when rpc_url is unset")]
    TemplateWithoutProjectId,

    #[error("transfer.gas_limit {0} is below the 21000 needed for a transfer")]
    GasLimitTooLow(u64),

    #[error("transfer.gas_price_multiplier must be a positive finite number, got {0}")]
    InvalidGasMultiplier(f64),

    #[error("confirmation.poll_interval_ms must be greater than zero")]
    ZeroPollInterval,
}

/// Validate a configuration, collecting all errors.
pub fn validate_config(config: &TransferConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let network = &config.network;

    if network.name.trim().is_empty() {
        errors.push(ValidationError::EmptyNetworkName);
    }
    if network.rpc_timeout_secs == 0 {
        errors.push(ValidationError::ZeroRpcTimeout);
    }

    match &network.rpc_url {
        Some(url) => {
            if let Err(e) = url.parse::<url::Url>() {
                errors.push(ValidationError::InvalidRpcUrl {
                    url: url.clone(),
                    reason: e.to_string(),
                });
            }
        }
        None => {
            if !network.provider_url_template.contains("{project_id}") {
                errors.push(ValidationError::TemplateWithoutProjectId);
            }
        }
    }

    for url in &network.failover_urls {
        if let Err(e) = url.parse::<url::Url>() {
            errors.push(ValidationError::InvalidFailoverUrl {
                url: url.clone(),
                reason: e.to_string(),
            });
        }
    }

    let transfer = &config.transfer;
    if transfer.gas_limit < TRANSFER_GAS {
        errors.push(ValidationError::GasLimitTooLow(transfer.gas_limit));
    }
    if !(transfer.gas_price_multiplier.is_finite() && transfer.gas_price_multiplier > 0.0) {
        errors.push(ValidationError::InvalidGasMultiplier(transfer.gas_price_multiplier));
    }

    if config.confirmation.poll_interval_ms == 0 {
        errors.push(ValidationError::ZeroPollInterval);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

//! Transfer transaction building.
//!
//! # Responsibilities
//! - Apply the gas price policy (spike cap, safety multiplier)
//! - Assemble a legacy native-currency transfer request

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, U256};
use alloy::rpc::types::TransactionRequest;

use crate::blockchain::types::{BlockchainError, BlockchainResult, ChainId};
use crate::config::TransferSettings;

const WEI_PER_GWEI: u128 = 1_000_000_000;

/// Everything needed to assemble one transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferParams {
    pub to: Address,
    pub value: U256,
    pub nonce: u64,
    /// Gas price in wei, after policy was applied.
    pub gas_price: u128,
    pub chain_id: ChainId,
}

/// Transaction builder for plain transfers.
#[derive(Debug, Clone)]
pub struct TxBuilder {
    settings: TransferSettings,
}

impl TxBuilder {
    /// Create a new transaction builder.
    pub fn new(settings: TransferSettings) -> Self {
        Self { settings }
    }

    /// Amount to send, in wei.
    pub fn value(&self) -> U256 {
        U256::from(self.settings.amount_wei)
    }

    /// Turn the node's suggested gas price into the price we pay.
    ///
    /// Rejects suggestions above `max_gas_price_gwei`, then scales by
    /// `gas_price_multiplier`.
    pub fn gas_price(&self, suggested: u128) -> BlockchainResult<u128> {
        let suggested_gwei = suggested / WEI_PER_GWEI;
        if suggested_gwei > self.settings.max_gas_price_gwei as u128 {
            return Err(BlockchainError::GasPriceTooHigh {
                current_gwei: u64::try_from(suggested_gwei).unwrap_or(u64::MAX),
                max_gwei: self.settings.max_gas_price_gwei,
            });
        }

        let multiplier = self.settings.gas_price_multiplier;
        if multiplier == 1.0 {
            return Ok(suggested);
        }
        Ok((suggested as f64 * multiplier) as u128)
    }

    /// Build the transfer request. Empty calldata, fixed gas limit.
    pub fn build(&self, params: &TransferParams) -> TransactionRequest {
        TransactionRequest::default()
            .with_to(params.to)
            .with_value(params.value)
            .with_nonce(params.nonce)
            .with_gas_price(params.gas_price)
            .with_gas_limit(self.settings.gas_limit)
            .with_chain_id(params.chain_id.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> TransferParams {
        TransferParams {
            to: Address::repeat_byte(0x11),
            value: U256::from(10_000_000_000_000_000u64),
            nonce: 3,
            gas_price: 1_500_000_000,
            chain_id: ChainId(11_155_111),
        }
    }

    #[test]
    fn test_gas_price_passthrough() {
        let builder = TxBuilder::new(TransferSettings::default());
        assert_eq!(builder.gas_price(1_234_567_891).unwrap(), 1_234_567_891);
    }

    #[test]
    fn test_gas_price_multiplier() {
        let builder = TxBuilder::new(TransferSettings {
            gas_price_multiplier: 1.5,
            ..Default::default()
        });
        assert_eq!(builder.gas_price(2_000_000_000).unwrap(), 3_000_000_000);
    }

    #[test]
    fn test_gas_price_cap() {
        let builder = TxBuilder::new(TransferSettings {
            max_gas_price_gwei: 100,
            ..Default::default()
        });
        assert!(builder.gas_price(100 * WEI_PER_GWEI).is_ok());

        let err = builder.gas_price(600 * WEI_PER_GWEI).unwrap_err();
        assert!(matches!(
            err,
            BlockchainError::GasPriceTooHigh {
                current_gwei: 600,
                max_gwei: 100
            }
        ));
    }

    #[test]
    fn test_build_legacy_transfer() {
        let builder = TxBuilder::new(TransferSettings::default());
        let tx = builder.build(&params());

        assert_eq!(tx.to, Some(Address::repeat_byte(0x11).into()));
        assert_eq!(tx.value, Some(U256::from(10_000_000_000_000_000u64)));
        assert_eq!(tx.nonce, Some(3));
        assert_eq!(tx.gas_price, Some(1_500_000_000));
        assert_eq!(tx.gas, Some(21_000));
        assert_eq!(tx.chain_id, Some(11_155_111));
        assert!(tx.max_fee_per_gas.is_none());
        assert!(tx.input.input().is_none());
    }

    #[test]
    fn test_value_from_settings() {
        let builder = TxBuilder::new(TransferSettings::default());
        assert_eq!(builder.value(), U256::from(10_000_000_000_000_000u64));
    }
}

//! The transfer pipeline.
//!
//! ```text
//! connect → from/to → nonce → amount → gas price → build → chain id
//!         → sign → broadcast → poll receipt → block number
//! ```
//!
//! Each step is a single delegated call; the first failure ends the run.
//! Progress is reported on stdout.

use alloy::primitives::{Address, TxHash};
use std::time::Duration;
use thiserror::Error;

use crate::blockchain::{
    wait_mined, wei_to_ether, BlockchainClient, BlockchainError, ChainId, SignedTransfer,
    TransferParams, TxBuilder, Wallet,
};
use crate::config::{ConfigError, TransferConfig};
use crate::lifecycle::CancelToken;

/// Anything that ends a transfer run.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Blockchain(#[from] BlockchainError),
}

/// Final result of a mined transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOutcome {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
}

/// One transfer run against a node provider.
#[derive(Debug)]
pub struct Transfer {
    client: BlockchainClient,
    builder: TxBuilder,
    network_name: String,
    poll_interval: Duration,
}

impl Transfer {
    /// Set up the client for `rpc_url` and the builder from `config`.
    pub fn new(config: &TransferConfig, rpc_url: &str) -> Result<Self, TransferError> {
        let client = BlockchainClient::new(rpc_url, &config.network)?;
        Ok(Self {
            client,
            builder: TxBuilder::new(config.transfer.clone()),
            network_name: config.network.name.clone(),
            poll_interval: Duration::from_millis(config.confirmation.poll_interval_ms),
        })
    }

    /// Reach the node and check its chain id.
    pub async fn connect(&self) -> Result<ChainId, TransferError> {
        let chain_id = self.client.verify_chain_id().await?;
        println!("Successfully connected to {} Ethereum network", capitalize(&self.network_name));
        Ok(chain_id)
    }

    /// Build, sign and broadcast the transfer from `wallet`'s account.
    pub async fn submit(
        &self,
        chain_id: ChainId,
        wallet: &Wallet,
        to: Address,
    ) -> Result<SignedTransfer, TransferError> {
        let from = wallet.address();
        println!("From Address: {}", from);
        println!("To Address: {}", to);

        let nonce = self.client.get_pending_nonce(from).await?;
        println!("Nonce: {}", nonce);

        let value = self.builder.value();
        println!("ETH transfer amount: {}", wei_to_ether(value));

        let suggested = self.client.get_gas_price().await?;
        let gas_price = self.builder.gas_price(suggested)?;
        println!("gasPrice: {}", gas_price);
        if gas_price != suggested {
            tracing::debug!(suggested, adjusted = gas_price, "Gas price adjusted");
        }

        let request = self.builder.build(&TransferParams {
            to,
            value,
            nonce,
            gas_price,
            chain_id,
        });
        println!("chainID: {}", chain_id);

        let signed = wallet.sign_transaction(request).await?;

        let reported = self.client.send_raw_transaction(&signed.raw).await?;
        if reported != signed.hash {
            tracing::warn!(local = %signed.hash, node = %reported, "Node reported a different transaction hash");
        }
        tracing::info!(tx_hash = %signed.hash, nonce, "Transaction broadcast");
        println!("Transaction sent! Tx Hash: {}", signed.hash);

        Ok(signed)
    }

    /// Poll until the transaction is mined. A failed receipt is an error.
    pub async fn confirm(&self, tx_hash: TxHash, cancel: &CancelToken) -> Result<TransferOutcome, TransferError> {
        let receipt = wait_mined(&self.client, tx_hash, self.poll_interval, cancel).await?;

        if !receipt.status() {
            return Err(BlockchainError::Reverted(tx_hash).into());
        }

        let block_number = receipt.block_number;
        match block_number {
            Some(block) => println!("Transaction mined! Block Number: {}", block),
            None => println!("Transaction mined! Block Number: <pending>"),
        }
        tracing::info!(tx_hash = %tx_hash, block_number, "Transaction mined");

        Ok(TransferOutcome {
            tx_hash,
            block_number,
        })
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize_network_name() {
        assert_eq!(capitalize("sepolia"), "Sepolia");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_error_is_transparent() {
        let err = TransferError::from(BlockchainError::Wallet("Invalid private key".to_string()));
        assert_eq!(err.to_string(), "Wallet error: Invalid private key");

        let err = TransferError::from(ConfigError::MissingEnv("PRIVATE_KEY_HEX"));
        assert_eq!(err.to_string(), "Environment variable PRIVATE_KEY_HEX not set");
    }

    #[test]
    fn test_new_rejects_bad_url() {
        let err = Transfer::new(&TransferConfig::default(), "::nope::").unwrap_err();
        assert!(matches!(err, TransferError::Blockchain(BlockchainError::Rpc(_))));
    }
}

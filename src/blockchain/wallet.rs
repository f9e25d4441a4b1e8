//! Wallet management and transaction signing.
//!
//! # Security
//! - Private keys are loaded ONLY from environment variables
//! - Keys are never logged or serialized, except on explicit request by
//!   the account generator

use alloy::consensus::TxEnvelope;
use alloy::eips::eip2718::Encodable2718;
use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::primitives::{keccak256, Address, Bytes, TxHash};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;

use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::config::env::PRIVATE_KEY_ENV_VAR;

/// A transaction signed and encoded, ready for broadcast.
#[derive(Debug, Clone)]
pub struct SignedTransfer {
    /// The signed envelope.
    pub envelope: TxEnvelope,
    /// EIP-2718 encoding sent over `eth_sendRawTransaction`.
    pub raw: Bytes,
    /// Transaction hash (keccak256 of `raw`).
    pub hash: TxHash,
}

/// Wallet holding the signing key of the sending account.
#[derive(Debug, Clone)]
pub struct Wallet {
    /// The underlying signer (private key).
    signer: PrivateKeySigner,
}

impl Wallet {
    /// Create a wallet from a hex-encoded private key string.
    ///
    /// # Arguments
    /// * `private_key_hex` - Hex string (with or without 0x prefix)
    ///
    /// # Security
    /// The private key is parsed and stored securely. It is never logged.
    pub fn from_private_key(private_key_hex: &str) -> BlockchainResult<Self> {
        let trimmed = private_key_hex.trim();
        let key_hex = trimmed.strip_prefix("0x").unwrap_or(trimmed);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| BlockchainError::Wallet(format!("Invalid private key: {}", e)))?;

        tracing::debug!(address = %signer.address(), "Wallet initialized");

        Ok(Self { signer })
    }

    /// Load wallet from environment variable.
    ///
    /// Reads `PRIVATE_KEY_HEX` from environment.
    pub fn from_env() -> BlockchainResult<Self> {
        let private_key = std::env::var(PRIVATE_KEY_ENV_VAR).map_err(|_| {
            BlockchainError::Wallet(format!(
                "Environment variable {} not set",
                PRIVATE_KEY_ENV_VAR
            ))
        })?;

        Self::from_private_key(&private_key)
    }

    /// Create a wallet around a freshly generated random key.
    pub fn generate() -> Self {
        Self {
            signer: PrivateKeySigner::random(),
        }
    }

    /// Get the wallet's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Export the private key as lowercase hex without a `0x` prefix.
    pub fn private_key_hex(&self) -> String {
        alloy::primitives::hex::encode(self.signer.to_bytes())
    }

    /// Sign a fully populated transaction request.
    ///
    /// A request carrying `gas_price` and `chain_id` is signed as a legacy
    /// transaction with EIP-155 replay protection.
    pub async fn sign_transaction(
        &self,
        request: TransactionRequest,
    ) -> BlockchainResult<SignedTransfer> {
        let wallet = EthereumWallet::from(self.signer.clone());
        let envelope = request
            .build(&wallet)
            .await
            .map_err(|e| BlockchainError::Signing(e.to_string()))?;

        let raw = Bytes::from(envelope.encoded_2718());
        let hash = keccak256(&raw);

        tracing::debug!(tx_hash = %hash, bytes = raw.len(), "Transaction signed");

        Ok(SignedTransfer {
            envelope,
            raw,
            hash,
        })
    }
}

//! Chain-specific types and error definitions.

use alloy::primitives::TxHash;
use thiserror::Error;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Invalid private key format or derivation error.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Transaction could not be assembled or signed.
    #[error("Signing failed: {0}")]
    Signing(String),

    /// Gas price exceeded maximum allowed.
    #[error("Gas price {current_gwei} gwei exceeds maximum {max_gwei} gwei")]
    GasPriceTooHigh { current_gwei: u64, max_gwei: u64 },

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },

    /// Transaction was mined with a failed status.
    #[error("Transaction {0} failed")]
    Reverted(TxHash),

    /// Waiting for the receipt was cancelled before it arrived.
    #[error("Cancelled while waiting for transaction {0} to be mined")]
    Cancelled(TxHash),
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_conversion() {
        let chain_id = ChainId::from(11_155_111u64);
        assert_eq!(chain_id.0, 11_155_111);
        assert_eq!(u64::from(chain_id), 11_155_111);
        assert_eq!(chain_id.to_string(), "11155111");
    }

    #[test]
    fn test_error_display() {
        let err = BlockchainError::Rpc("All RPC providers failed to get gas price".to_string());
        assert_eq!(err.to_string(), "RPC error: All RPC providers failed to get gas price");

        let err = BlockchainError::GasPriceTooHigh {
            current_gwei: 600,
            max_gwei: 500,
        };
        assert!(err.to_string().contains("600"));

        let err = BlockchainError::Cancelled(TxHash::ZERO);
        assert!(err.to_string().starts_with("Cancelled while waiting"));
    }
}

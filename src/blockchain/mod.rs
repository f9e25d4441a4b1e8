//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment Variables (private key, project id)
//!     → wallet.rs (key loading, signing)
//!     → client.rs (RPC connection with timeouts and failover)
//!     → transaction.rs (gas policy, request assembly)
//!     → confirmation.rs (fixed-interval receipt polling)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or provider project ids
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod confirmation;
pub mod transaction;
pub mod types;
pub mod units;
pub mod wallet;

pub use client::BlockchainClient;
pub use confirmation::{wait_mined, ReceiptSource};
pub use transaction::{TransferParams, TxBuilder};
pub use types::{BlockchainError, BlockchainResult, ChainId};
pub use units::wei_to_ether;
pub use wallet::{SignedTransfer, Wallet};

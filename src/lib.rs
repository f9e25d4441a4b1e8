//! Sepolia transfer tool library.
//!
//! Connects to an Ethereum network through a hosted node provider, signs a
//! single native-currency transfer with a key from the environment,
//! broadcasts it and waits for it to be mined.

pub mod blockchain;
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod transfer;

pub use config::schema::TransferConfig;
pub use lifecycle::{CancelToken, Cancellation};
pub use transfer::{Transfer, TransferError, TransferOutcome};

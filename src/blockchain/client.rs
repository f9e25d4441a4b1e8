//! Blockchain RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to the node provider's JSON-RPC endpoint (plus failovers)
//! - Query chain state (chain id, pending nonce, gas price, receipts)
//! - Broadcast signed transactions
//! - Handle timeouts and network errors gracefully

use alloy::primitives::{keccak256, Address, Bytes, TxHash};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionReceipt;
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::types::{BlockchainError, BlockchainResult, ChainId};
use crate::config::NetworkConfig;

type DynProvider = Arc<dyn Provider + Send + Sync>;

/// Blockchain RPC client wrapper with failover support.
#[derive(Clone)]
pub struct BlockchainClient {
    /// List of providers (primary + failovers).
    providers: Vec<DynProvider>,
    /// Endpoint URLs, parallel to `providers`, for diagnostics.
    urls: Vec<url::Url>,
    /// Chain id the node must report, if any.
    expected_chain_id: Option<u64>,
    /// Request timeout duration.
    timeout_duration: Duration,
}

impl BlockchainClient {
    /// Create a new blockchain client.
    ///
    /// No request is made here; call [`Self::verify_chain_id`] to prove the
    /// endpoint is reachable.
    ///
    /// # Arguments
    /// * `rpc_url` - Primary endpoint, already resolved from the config
    /// * `network` - Failovers, expected chain id and timeout
    pub fn new(rpc_url: &str, network: &NetworkConfig) -> BlockchainResult<Self> {
        let mut providers = Vec::new();
        let mut urls = Vec::new();

        // 1. Add primary provider
        let primary_url: url::Url = rpc_url
            .parse()
            .map_err(|e| BlockchainError::Rpc(format!("Invalid RPC URL: {}", e)))?;
        providers.push(Arc::new(ProviderBuilder::new().connect_http(primary_url.clone())) as DynProvider);
        urls.push(primary_url);

        // 2. Add failover providers
        for url_str in &network.failover_urls {
            match url_str.parse::<url::Url>() {
                Ok(url) => {
                    providers.push(Arc::new(ProviderBuilder::new().connect_http(url.clone())) as DynProvider);
                    urls.push(url);
                }
                Err(_) => tracing::warn!(url = %url_str, "Ignoring invalid failover RPC URL"),
            }
        }

        tracing::debug!(
            host = url_host(&urls[0]),
            failovers = providers.len() - 1,
            timeout_secs = network.rpc_timeout_secs,
            "Blockchain client initialized"
        );

        Ok(Self {
            providers,
            urls,
            expected_chain_id: network.chain_id,
            timeout_duration: Duration::from_secs(network.rpc_timeout_secs),
        })
    }

    /// Run `op` against each provider in turn until one answers in time.
    async fn with_failover<T, E, F, Fut>(&self, what: &'static str, op: F) -> BlockchainResult<T>
    where
        F: Fn(DynProvider) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        for (i, provider) in self.providers.iter().enumerate() {
            match timeout(self.timeout_duration, op(provider.clone())).await {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(e)) => {
                    tracing::warn!(provider_idx = i, op = what, error = %e, "RPC error, trying next provider");
                }
                Err(_) => {
                    tracing::warn!(
                        provider_idx = i,
                        op = what,
                        timeout_secs = self.timeout_duration.as_secs(),
                        "RPC timeout, trying next provider"
                    );
                }
            }
        }
        Err(BlockchainError::Rpc(format!("All RPC providers failed to {}", what)))
    }

    /// Verify the connected chain ID matches configuration.
    ///
    /// Returns the chain id the node reports, used for EIP-155 signing.
    pub async fn verify_chain_id(&self) -> BlockchainResult<ChainId> {
        let chain_id = self.get_chain_id().await?;
        if let Some(expected) = self.expected_chain_id {
            if chain_id.0 != expected {
                return Err(BlockchainError::ChainMismatch {
                    expected,
                    actual: chain_id.0,
                });
            }
        }
        Ok(chain_id)
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> BlockchainResult<ChainId> {
        self.with_failover("get chain id", |p| async move { p.get_chain_id().await })
            .await
            .map(ChainId)
    }

    /// Get the nonce for the next transaction, counting pending ones.
    pub async fn get_pending_nonce(&self, address: Address) -> BlockchainResult<u64> {
        self.with_failover("get transaction count", move |p| async move {
            p.get_transaction_count(address).pending().await
        })
        .await
    }

    /// Get current gas price in wei.
    pub async fn get_gas_price(&self) -> BlockchainResult<u128> {
        self.with_failover("get gas price", |p| async move { p.get_gas_price().await })
            .await
    }

    /// Broadcast a signed, encoded transaction. Returns the hash the node
    /// reports.
    ///
    /// Sent once, to the primary endpoint only; never replayed on a failover.
    pub async fn send_raw_transaction(&self, raw: &Bytes) -> BlockchainResult<TxHash> {
        let local_hash = keccak256(raw);
        match timeout(self.timeout_duration, self.providers[0].send_raw_transaction(&raw[..])).await {
            Ok(Ok(pending)) => Ok(*pending.tx_hash()),
            Ok(Err(e)) => Err(BlockchainError::Rpc(format!("Failed to send transaction: {}", e))),
            Err(_) => {
                tracing::warn!(
                    tx_hash = %local_hash,
                    timeout_secs = self.timeout_duration.as_secs(),
                    "RPC timeout while sending transaction"
                );
                Err(BlockchainError::Rpc(format!(
                    "Timed out sending transaction {}; it may still be pending",
                    local_hash
                )))
            }
        }
    }

    /// Get a transaction receipt by hash. `None` while not yet mined.
    pub async fn get_transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> BlockchainResult<Option<TransactionReceipt>> {
        self.with_failover("get receipt", move |p| async move {
            p.get_transaction_receipt(tx_hash).await
        })
        .await
    }

    #[cfg(test)]
    fn endpoint_count(&self) -> usize {
        self.providers.len()
    }
}

/// Host part only; provider URLs carry the project id in their path.
fn url_host(url: &url::Url) -> &str {
    url.host_str().unwrap_or("<none>")
}

impl std::fmt::Debug for BlockchainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockchainClient")
            .field("hosts", &self.urls.iter().map(url_host).collect::<Vec<_>>())
            .field("expected_chain_id", &self.expected_chain_id)
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}

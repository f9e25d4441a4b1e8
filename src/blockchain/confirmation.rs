//! Waiting for a broadcast transaction to be mined.
//!
//! Look the receipt up; if it is not there yet, check for cancellation and
//! sleep a fixed interval. No backoff and no attempt cap: the cancel token is
//! the only way out besides success.

use alloy::primitives::TxHash;
use alloy::rpc::types::TransactionReceipt;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::lifecycle::CancelToken;

/// Anything that can look up a receipt by transaction hash.
pub trait ReceiptSource {
    type Receipt;

    /// `Ok(None)` means the transaction is not mined yet.
    fn receipt(
        &self,
        tx_hash: TxHash,
    ) -> impl Future<Output = BlockchainResult<Option<Self::Receipt>>> + Send;
}

impl ReceiptSource for BlockchainClient {
    type Receipt = TransactionReceipt;

    fn receipt(
        &self,
        tx_hash: TxHash,
    ) -> impl Future<Output = BlockchainResult<Option<TransactionReceipt>>> + Send {
        self.get_transaction_receipt(tx_hash)
    }
}

/// Poll `source` until the receipt for `tx_hash` shows up.
///
/// Lookup errors are treated like "not mined yet". Cancellation is checked
/// after each unsuccessful lookup, before sleeping `interval`.
pub async fn wait_mined<S: ReceiptSource>(
    source: &S,
    tx_hash: TxHash,
    interval: Duration,
    cancel: &CancelToken,
) -> BlockchainResult<S::Receipt> {
    let mut attempts: u64 = 0;
    loop {
        attempts += 1;
        match source.receipt(tx_hash).await {
            Ok(Some(receipt)) => {
                tracing::debug!(tx_hash = %tx_hash, attempts, "Receipt found");
                return Ok(receipt);
            }
            Ok(None) => tracing::trace!(tx_hash = %tx_hash, attempts, "Transaction pending"),
            Err(e) => tracing::debug!(tx_hash = %tx_hash, attempts, error = %e, "Receipt lookup failed"),
        }

        println!("Waiting for transaction to be mined...");

        if cancel.is_cancelled() {
            tracing::warn!(tx_hash = %tx_hash, attempts, "Stopped waiting for receipt");
            return Err(BlockchainError::Cancelled(tx_hash));
        }
        sleep(interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::Cancellation;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Yields a receipt (the attempt number) from the `ready_at`-th lookup on.
    struct ScriptedSource {
        calls: AtomicU32,
        ready_at: u32,
        fail_before_ready: bool,
    }

    impl ScriptedSource {
        fn new(ready_at: u32) -> Self {
            Self {
                calls: AtomicU32::new(0),
                ready_at,
                fail_before_ready: false,
            }
        }
    }

    impl ReceiptSource for ScriptedSource {
        type Receipt = u32;

        fn receipt(
            &self,
            _tx_hash: TxHash,
        ) -> impl Future<Output = BlockchainResult<Option<u32>>> + Send {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            let fail = self.fail_before_ready;
            let ready_at = self.ready_at;
            async move {
                if call >= ready_at {
                    Ok(Some(call))
                } else if fail {
                    Err(BlockchainError::Rpc("not found".to_string()))
                } else {
                    Ok(None)
                }
            }
        }
    }

    #[tokio::test]
    async fn test_returns_immediately_when_mined() {
        let source = ScriptedSource::new(1);
        let cancellation = Cancellation::new();
        let receipt = wait_mined(&source, TxHash::ZERO, Duration::from_secs(60), &cancellation.token())
            .await
            .unwrap();
        assert_eq!(receipt, 1);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retries_until_mined() {
        let source = ScriptedSource::new(3);
        let cancellation = Cancellation::new();
        let receipt = wait_mined(&source, TxHash::ZERO, Duration::from_millis(5), &cancellation.token())
            .await
            .unwrap();
        assert_eq!(receipt, 3);
    }

    #[tokio::test]
    async fn test_lookup_errors_are_retried() {
        let mut source = ScriptedSource::new(2);
        source.fail_before_ready = true;
        let cancellation = Cancellation::new();
        let receipt = wait_mined(&source, TxHash::ZERO, Duration::from_millis(5), &cancellation.token())
            .await
            .unwrap();
        assert_eq!(receipt, 2);
    }

    #[tokio::test]
    async fn test_cancelled_before_success() {
        let source = ScriptedSource::new(u32::MAX);
        let cancellation = Cancellation::new();
        let token = cancellation.token();
        cancellation.trigger();

        let hash = TxHash::repeat_byte(0xab);
        let err = wait_mined(&source, hash, Duration::from_secs(60), &token)
            .await
            .unwrap_err();
        assert!(matches!(err, BlockchainError::Cancelled(h) if h == hash));
        // One lookup, then the cancel check ends the loop.
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cancelled_while_waiting() {
        let source = ScriptedSource::new(u32::MAX);
        let cancellation = Cancellation::new();
        let token = cancellation.token();

        let trigger = tokio::spawn(async move {
            sleep(Duration::from_millis(30)).await;
            cancellation.trigger();
            cancellation
        });

        let err = wait_mined(&source, TxHash::ZERO, Duration::from_millis(5), &token)
            .await
            .unwrap_err();
        assert!(matches!(err, BlockchainError::Cancelled(_)));
        assert!(source.calls.load(Ordering::SeqCst) > 1);
        trigger.await.unwrap();
    }

    #[tokio::test]
    async fn test_success_wins_over_cancellation() {
        let source = ScriptedSource::new(1);
        let cancellation = Cancellation::new();
        cancellation.trigger();
        let receipt = wait_mined(&source, TxHash::ZERO, Duration::from_secs(60), &cancellation.token())
            .await
            .unwrap();
        assert_eq!(receipt, 1);
    }
}

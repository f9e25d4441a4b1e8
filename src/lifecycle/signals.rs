//! OS signal and deadline handling.
//!
//! Ctrl-C (SIGINT) and the optional confirmation deadline both fire the same
//! [`Cancellation`]; whichever comes first wins.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::lifecycle::shutdown::Cancellation;

/// Why the run was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    Interrupted,
    DeadlineElapsed,
}

/// Spawn a task that fires `cancellation` on Ctrl-C or once `deadline`
/// elapses. `None` waits for Ctrl-C only.
///
/// The task owns the signal; abort the handle when the run finishes.
pub fn spawn_cancel_triggers(
    cancellation: Cancellation,
    deadline: Option<Duration>,
) -> JoinHandle<CancelReason> {
    tokio::spawn(async move {
        let reason = wait_for_trigger(deadline).await;
        match reason {
            CancelReason::Interrupted => tracing::warn!("Interrupt received, cancelling"),
            CancelReason::DeadlineElapsed => tracing::warn!(
                deadline_secs = deadline.map(|d| d.as_secs()).unwrap_or_default(),
                "Confirmation deadline elapsed, cancelling"
            ),
        }
        cancellation.trigger();
        reason
    })
}

async fn wait_for_trigger(deadline: Option<Duration>) -> CancelReason {
    let interrupted = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            // Without a handler only the deadline can cancel.
            std::future::pending::<()>().await;
        }
    };

    match deadline {
        Some(deadline) => tokio::select! {
            _ = interrupted => CancelReason::Interrupted,
            _ = sleep(deadline) => CancelReason::DeadlineElapsed,
        },
        None => {
            interrupted.await;
            CancelReason::Interrupted
        }
    }
}

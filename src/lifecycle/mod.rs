//! Lifecycle management.
//!
//! # Data Flow
//! ```text
//! Ctrl-C / confirmation deadline
//!     → signals.rs (spawned watcher task)
//!     → shutdown.rs Cancellation::trigger()
//!     → CancelToken::is_cancelled() checked by the receipt poll loop
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::{CancelToken, Cancellation};
pub use signals::{spawn_cancel_triggers, CancelReason};

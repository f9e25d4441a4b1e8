//! Observability subsystem.
//!
//! # Design Decisions
//! - `tracing` events with structured fields for diagnostics (stderr)
//! - The human-facing transfer report is plain stdout, not log output
//! - Private keys and provider project ids are never recorded

pub mod logging;

pub use logging::init_logging;

//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env file + process environment
//!     → env.rs (project id, recipient; private key read by the wallet)
//!
//! optional config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → CLI overrides applied by main
//!     → validation.rs (semantic checks)
//!     → TransferConfig (validated, immutable for the run)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults, so running without a file targets Sepolia
//! - Secrets never live in the config file
//! - Validation separates syntactic (serde) from semantic checks

pub mod env;
pub mod loader;
pub mod schema;
pub mod validation;

pub use env::EnvSettings;
pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::{ConfirmationConfig, NetworkConfig, TransferConfig, TransferSettings};
pub use validation::{validate_config, ValidationError};

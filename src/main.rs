//! sepolia-transfer
//!
//! Sends one native-currency transfer through a hosted node provider and
//! waits for it to be mined.
//!
//! ```text
//!  .env / environment ──┐
//!  config file (TOML) ──┼─▶ TransferConfig ─▶ Transfer::submit ─▶ node provider (JSON-RPC)
//!  CLI flags ───────────┘                     Transfer::confirm
//!                                                   └─ receipt poll ◀─ Ctrl-C / deadline
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use alloy::primitives::Address;
use clap::{Args, Parser, Subcommand};

use sepolia_transfer::blockchain::Wallet;
use sepolia_transfer::config::env::{load_dotenv, parse_address, EnvSettings};
use sepolia_transfer::config::{load_or_default, validate_config, ConfigError, TransferConfig};
use sepolia_transfer::lifecycle::{spawn_cancel_triggers, Cancellation};
use sepolia_transfer::observability::init_logging;
use sepolia_transfer::{Transfer, TransferError};

#[derive(Parser)]
#[command(name = "sepolia-transfer", version)]
#[command(about = "Send a native-currency transfer on an Ethereum testnet", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). Overrides the config.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign, broadcast and confirm a transfer (default)
    Send(SendArgs),
    /// Generate a new account and print its address and private key
    Generate,
}

#[derive(Args, Default)]
struct SendArgs {
    /// Recipient address. Defaults to RECIPIENT_ADDRESS.
    #[arg(long)]
    to: Option<String>,

    /// Amount in Wei.
    #[arg(long)]
    amount_wei: Option<u64>,

    /// JSON-RPC endpoint, bypassing the provider template.
    #[arg(long)]
    rpc_url: Option<String>,

    /// Stop waiting for the receipt after this many seconds (0 = never).
    #[arg(long)]
    timeout_secs: Option<u64>,
}

impl SendArgs {
    fn apply(&self, config: &mut TransferConfig) {
        if let Some(amount) = self.amount_wei {
            config.transfer.amount_wei = amount;
        }
        if let Some(url) = &self.rpc_url {
            config.network.rpc_url = Some(url.clone());
        }
        if let Some(secs) = self.timeout_secs {
            config.confirmation.timeout_secs = secs;
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let dotenv = load_dotenv();
    let command = cli.command.unwrap_or(Commands::Send(SendArgs::default()));

    let config = match prepare_config(cli.config.as_deref(), &command) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(cli.log_level.as_deref().unwrap_or(&config.observability.log_level));
    dotenv.log();

    let result = match command {
        Commands::Send(args) => send(&config, &args).await,
        Commands::Generate => {
            generate();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Transfer failed");
            ExitCode::FAILURE
        }
    }
}

fn prepare_config(path: Option<&std::path::Path>, command: &Commands) -> Result<TransferConfig, ConfigError> {
    let mut config = load_or_default(path)?;
    if let Commands::Send(args) = command {
        args.apply(&mut config);
    }
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

async fn send(config: &TransferConfig, args: &SendArgs) -> Result<(), TransferError> {
    let env = EnvSettings::from_env()?;
    let to: Address = match &args.to {
        Some(raw) => parse_address("--to", raw)?,
        None => env.require_recipient()?,
    };
    let rpc_url = config.network.resolve_rpc_url(env.project_id.as_deref())?;

    let transfer = Transfer::new(config, &rpc_url)?;
    let chain_id = transfer.connect().await?;

    let wallet = Wallet::from_env()?;
    let signed = transfer.submit(chain_id, &wallet, to).await?;

    // The deadline covers waiting for the receipt only.
    let cancellation = Cancellation::new();
    let token = cancellation.token();
    let deadline = match config.confirmation.timeout_secs {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    };
    let triggers = spawn_cancel_triggers(cancellation, deadline);

    let outcome = transfer.confirm(signed.hash, &token).await;
    triggers.abort();
    if let Ok(reason) = triggers.await {
        tracing::info!(?reason, tx_hash = %signed.hash, "Stopped waiting for the receipt");
    }

    let outcome = outcome?;
    tracing::debug!(tx_hash = %outcome.tx_hash, "Transfer complete");
    Ok(())
}

fn generate() {
    let wallet = Wallet::generate();
    println!("=== New Ethereum account ===");
    println!("Address: {}", wallet.address());
    println!("Private key (HEX): {}", wallet.private_key_hex());
}

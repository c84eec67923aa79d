//! `wallet-rpc`: command-line front end for the wallet core.
//!
//! # Architecture Overview
//!
//! ```text
//!   CLI args ──▶ config (TOML + WALLET_RPC_URL) ──▶ ChainClient ──▶ RpcClient ──▶ node
//!                                  │                     │
//!                                  │                     └─▶ ConfirmationPoller (Ctrl-C cancels)
//!                                  └─▶ SessionStore ──▶ FileStore (JSON)
//! ```
//!
//! Signing is out of scope: `memo` prints an unsigned transaction for an
//! external wallet, `send` takes transactions that are already signed.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use thiserror::Error;

use solana_wallet_rpc::blockchain::types::lamports_to_sol;
use solana_wallet_rpc::config::validation::validate_config;
use solana_wallet_rpc::config::{load_or_default, ConfigError};
use solana_wallet_rpc::lifecycle::signals::cancel_on_ctrl_c;
use solana_wallet_rpc::observability::logging;
use solana_wallet_rpc::session::FileStore;
use solana_wallet_rpc::{
    ChainClient, ClientConfig, ClientError, ConfirmationOutcome, PublicKey, SessionStore, Shutdown,
    WalletConnection,
};

#[derive(Parser)]
#[command(name = "wallet-rpc")]
#[command(about = "Query a Solana node, submit transactions and manage the wallet session", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RPC endpoint, overriding the configuration.
    #[arg(short, long)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show an account balance
    Balance { pubkey: String },
    /// Fetch the latest blockhash
    Blockhash {
        #[arg(long)]
        commitment: Option<String>,
    },
    /// Request an airdrop and wait for finality
    Airdrop {
        pubkey: String,
        #[arg(long)]
        lamports: Option<u64>,
        /// Return right after submission
        #[arg(long)]
        no_confirm: bool,
    },
    /// Wait for a signature to be finalized
    Confirm { signature: String },
    /// Print an unsigned memo transaction as JSON
    Memo { pubkey: String, text: String },
    /// Submit signed transactions given as base58
    Send {
        #[arg(required = true)]
        transactions: Vec<String>,
    },
    /// Inspect or change the stored wallet session
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Show the active session
    Show,
    /// Store a session authorized by an external wallet
    Connect {
        pubkey: String,
        label: String,
        auth_token: String,
    },
    /// Forget the active session
    Disconnect,
}

/// Failures of the command line itself, on top of client errors.
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("transaction '{input}' is not valid base58: {reason}")]
    InvalidTransaction { input: String, reason: String },

    #[error("could not encode transaction as JSON: {0}")]
    Encode(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(url) = cli.url {
        config.rpc.endpoint = url;
        if let Err(errors) = validate_config(&config) {
            eprintln!("Error: {}", ConfigError::Validation(errors));
            return ExitCode::FAILURE;
        }
    }

    logging::init_logging(&config.observability);

    match run(cli.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("Error: {}", e);
            if let CliError::Client(failure @ ClientError::PartialSendFailure { .. }) = &e {
                eprintln!("Resubmit indices: {:?}", failure.failed_indices());
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, config: ClientConfig) -> Result<(), CliError> {
    let shutdown = Shutdown::new();
    let _ctrl_c = cancel_on_ctrl_c(&shutdown);
    let airdrop_lamports = config.airdrop.lamports;
    let chain = ChainClient::from_config(config).with_cancellation(&shutdown);

    match command {
        Commands::Balance { pubkey } => {
            let key: PublicKey = pubkey.parse()?;
            let lamports = chain.get_balance(&key).await?;
            println!("{} lamports ({} SOL)", lamports, lamports_to_sol(lamports));
        }
        Commands::Blockhash { commitment } => {
            let blockhash = match commitment {
                Some(c) => chain.get_latest_blockhash_with(&c).await?,
                None => chain.get_latest_blockhash().await?,
            };
            println!("{} (valid through block height {})", blockhash.value, blockhash.last_valid_block_height);
        }
        Commands::Airdrop {
            pubkey,
            lamports,
            no_confirm,
        } => {
            let key: PublicKey = pubkey.parse()?;
            let lamports = lamports.unwrap_or(airdrop_lamports);
            let signature = chain.request_airdrop(&key, lamports).await?;
            println!("Airdrop submitted: {}", signature);
            if !no_confirm {
                report_outcome(chain.confirm_transaction(&signature).await?);
            }
        }
        Commands::Confirm { signature } => {
            report_outcome(chain.confirm_transaction(&signature).await?);
        }
        Commands::Memo { pubkey, text } => {
            let key: PublicKey = pubkey.parse()?;
            let transaction = chain.build_memo_transaction(key, &text).await?;
            let json = serde_json::to_string_pretty(&transaction)?;
            println!("{}", json);
        }
        Commands::Send { transactions } => {
            let decoded = decode_transactions(&transactions)?;
            for signature in chain.send_transactions(&decoded).await? {
                println!("{}", signature);
            }
        }
        Commands::Session { action } => run_session(action, chain.config())?,
    }
    Ok(())
}

fn decode_transactions(transactions: &[String]) -> Result<Vec<Vec<u8>>, CliError> {
    transactions
        .iter()
        .map(|tx| {
            bs58::decode(tx).into_vec().map_err(|e| CliError::InvalidTransaction {
                input: tx.clone(),
                reason: e.to_string(),
            })
        })
        .collect()
}

fn report_outcome(outcome: ConfirmationOutcome) {
    match outcome {
        ConfirmationOutcome::Finalized { polls } => println!("Finalized after {} polls", polls),
        ConfirmationOutcome::TimedOut { polls } => {
            println!("Not finalized before the deadline ({} polls); outcome unknown", polls)
        }
    }
}

fn run_session(action: SessionAction, config: &ClientConfig) -> Result<(), ClientError> {
    let store = FileStore::open(&config.session.store_path)?;
    let session = SessionStore::new(store, &config.session.namespace);

    match action {
        SessionAction::Show => match session.get_connection()? {
            WalletConnection::Connected {
                public_key,
                account_label,
                ..
            } => println!("Connected: {} ({})", public_key, account_label),
            WalletConnection::NotConnected => println!("Not connected"),
        },
        SessionAction::Connect {
            pubkey,
            label,
            auth_token,
        } => {
            let key: PublicKey = pubkey.parse()?;
            session.persist_connection(key, &label, &auth_token)?;
            println!("Connected: {}", key);
        }
        SessionAction::Disconnect => {
            session.clear_connection()?;
            println!("Disconnected");
        }
    }
    Ok(())
}

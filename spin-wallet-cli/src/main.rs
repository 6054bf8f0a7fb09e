//! Spin Wallet CLI
//!
//! Command-line host for the read-only address pipeline: generate throwaway
//! mnemonics, derive their Solana addresses and print them.

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use spin_wallet::crypto::keys::solana::SOLANA_DERIVATION_PATH;
use spin_wallet::crypto::mnemonic::generate_mnemonic;
use spin_wallet::crypto::MacBackendKind;
use spin_wallet::{AddressDeriver, DeriveConfig};

#[derive(Parser)]
#[command(name = "spin-wallet")]
#[command(about = "Derive read-only Solana addresses from throwaway mnemonics")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// HMAC backend override (builtin or rustcrypto)
    #[arg(short, long, global = true)]
    backend: Option<MacBackendKind>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate mnemonics and derive their addresses
    Spin {
        /// Number of addresses to produce
        #[arg(short, long, default_value_t = 1)]
        count: u32,

        /// Also print the generated mnemonic
        #[arg(long)]
        show_mnemonic: bool,
    },
    /// Derive the address of a 12-word mnemonic
    Derive {
        /// The mnemonic words, as separate arguments or one quoted phrase.
        /// Arguments are split on whitespace; each word must then match the
        /// English BIP-39 list exactly (no case folding)
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,
    },
    /// Print a fresh duplicate-free mnemonic
    Generate,
    /// Print the derivation path
    Path,
}

#[derive(Serialize)]
struct SpinRecord<'a> {
    address: &'a str,
    short_address: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    mnemonic: Option<&'a [String]>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("spin_wallet={},spin_wallet_cli={}", log_level, log_level))),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = DeriveConfig::from_env();
    if let Some(backend) = cli.backend {
        config = config.with_mac_backend(backend);
    }
    config.validate()?;
    debug!(?config, "loaded configuration");

    let deriver = AddressDeriver::new(config);

    match &cli.command {
        Commands::Spin { count, show_mnemonic } => handle_spin(&deriver, *count, *show_mnemonic, cli.json)?,
        Commands::Derive { words } => handle_derive(&deriver, words, cli.json)?,
        Commands::Generate => handle_generate(&deriver, cli.json)?,
        Commands::Path => println!("{}", SOLANA_DERIVATION_PATH),
    }

    Ok(())
}

fn handle_spin(deriver: &AddressDeriver, count: u32, show_mnemonic: bool, json: bool) -> anyhow::Result<()> {
    info!(count, backend = %deriver.config().mac_backend, "spinning addresses");

    for _ in 0..count {
        let outcome = deriver.spin().context("address derivation failed")?;
        let record = SpinRecord {
            address: outcome.address.as_str(),
            short_address: &outcome.short_address,
            mnemonic: show_mnemonic.then_some(outcome.mnemonic.as_slice()),
        };

        if json {
            println!("{}", serde_json::to_string(&record)?);
        } else {
            println!("{}  {}", record.short_address, record.address);
            if let Some(mnemonic) = record.mnemonic {
                println!("    {}", mnemonic.join(" "));
            }
        }
    }

    Ok(())
}

fn handle_derive(deriver: &AddressDeriver, words: &[String], json: bool) -> anyhow::Result<()> {
    // Accept the phrase either as separate arguments or as one quoted string
    let words: Vec<&str> = words.iter().flat_map(|w| w.split_whitespace()).collect();
    let address = deriver.derive(&words).context("mnemonic rejected")?;

    if json {
        let record = SpinRecord {
            address: address.as_str(),
            short_address: &address.short(deriver.config().short_address_chars),
            mnemonic: None,
        };
        println!("{}", serde_json::to_string(&record)?);
    } else {
        println!("{}", address);
    }

    Ok(())
}

fn handle_generate(deriver: &AddressDeriver, json: bool) -> anyhow::Result<()> {
    let mnemonic = generate_mnemonic(deriver.config().max_generate_attempts)?;

    if json {
        println!("{}", serde_json::to_string(&mnemonic)?);
    } else {
        println!("{}", mnemonic.join(" "));
    }

    Ok(())
}

// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Timelock Node
//!
//! Entry point for the `timelock-node` binary. Parses CLI arguments,
//! initializes logging, and dispatches to a subcommand:
//!
//! - `derive`   — compute a vault address and bump
//! - `simulate` — run a full vault lifecycle on an in-memory ledger
//! - `keygen`   — generate a depositor keypair
//! - `version`  — print build version information
//!
//! Results go to stdout as JSON; logs go to stderr.

mod cli;
mod logging;
mod simulate;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;

use timelock_contracts::{derive_vault_address, Asset};
use timelock_protocol::config::TIMELOCK_PROGRAM_ID;
use timelock_protocol::crypto::Keypair;
use timelock_protocol::Address;

use cli::{Commands, TimelockCli};

fn main() -> Result<()> {
    let cli = TimelockCli::parse();
    logging::init_logging(&cli.log, cli.log_format);

    match cli.command {
        Commands::Derive(args) => derive(args),
        Commands::Simulate(args) => {
            let report = simulate::run(&args)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Commands::Keygen => {
            keygen();
            Ok(())
        }
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Prints the vault address for the given lock parameters.
fn derive(args: cli::DeriveArgs) -> Result<()> {
    let owner = parse_address("--owner", &args.owner)?;
    let program_id = match &args.program_id {
        Some(raw) => parse_address("--program-id", raw)?,
        None => TIMELOCK_PROGRAM_ID,
    };
    let asset = match &args.mint {
        Some(raw) => Asset::Token(parse_address("--mint", raw)?),
        None => Asset::Native,
    };

    let (vault, bump) =
        derive_vault_address(&program_id, &owner, &asset, args.amount, args.unlock_time)
            .context("vault address derivation failed")?;
    tracing::debug!(%vault, bump, %asset, "vault derived");

    let output = json!({
        "vault": vault.to_base58(),
        "bump": bump,
        "owner": owner.to_base58(),
        "asset": asset.to_string(),
        "amount": args.amount,
        "unlock_time": args.unlock_time,
        "program_id": program_id.to_base58(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Generates a keypair for use with `simulate --keypair`.
fn keygen() {
    let keypair = Keypair::generate();
    tracing::info!(address = %keypair.address(), "keypair generated");
    println!("Address : {}", keypair.address());
    println!("Secret  : {}", hex::encode(keypair.secret_key_bytes()));
}

fn parse_address(flag: &str, raw: &str) -> Result<Address> {
    raw.parse::<Address>()
        .with_context(|| format!("{flag}: not a base58 address: {raw}"))
}

/// Prints version information to stdout.
fn print_version() {
    println!("timelock-node {}", env!("CARGO_PKG_VERSION"));
    println!("program       {}", TIMELOCK_PROGRAM_ID);
}

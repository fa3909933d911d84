//! # CLI Interface
//!
//! Defines the command-line argument structure for `timelock-node` using
//! `clap` derive. Supports four subcommands: `derive`, `simulate`,
//! `keygen`, and `version`.

use clap::{Args, Parser, Subcommand};

use crate::logging::LogFormat;

/// Timelock vault tool.
///
/// Computes vault addresses offline and runs complete vault lifecycles
/// against an in-memory ledger with a simulated clock.
#[derive(Parser, Debug)]
#[command(
    name = "timelock-node",
    about = "Timelock vault address derivation and local simulation",
    version,
    propagate_version = true
)]
pub struct TimelockCli {
    /// Log filter directives, overridden by `RUST_LOG` when set.
    #[arg(
        long,
        global = true,
        env = "TIMELOCK_LOG",
        default_value = "timelock_node=info,timelock_contracts=info,timelock_protocol=warn"
    )]
    pub log: String,

    /// Log output format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the vault address and bump for a set of lock parameters.
    Derive(DeriveArgs),
    /// Lock funds, attempt an early withdrawal, advance the clock and
    /// withdraw, all on a throwaway in-memory ledger.
    Simulate(SimulateArgs),
    /// Generate a keypair and print its address and hex secret.
    Keygen,
    /// Print version information and exit.
    Version,
}

/// Arguments for the `derive` subcommand.
#[derive(Args, Debug)]
pub struct DeriveArgs {
    /// Depositor address (base58).
    #[arg(long)]
    pub owner: String,

    /// Locked amount in the asset's smallest unit.
    #[arg(long)]
    pub amount: u64,

    /// Unlock time, unix seconds.
    #[arg(long, allow_negative_numbers = true)]
    pub unlock_time: i64,

    /// Token mint (base58). Omit for a native-currency vault.
    #[arg(long)]
    pub mint: Option<String>,

    /// Program id (base58). Defaults to the built-in vault program id.
    #[arg(long)]
    pub program_id: Option<String>,
}

/// Arguments for the `simulate` subcommand.
#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Amount to lock.
    #[arg(long, default_value_t = 100_000_000)]
    pub amount: u64,

    /// Seconds between the lock and its unlock time.
    #[arg(long, default_value_t = 60, allow_negative_numbers = true)]
    pub lock_secs: i64,

    /// Lock a freshly minted token instead of the native currency.
    #[arg(long)]
    pub token: bool,

    /// Decimals of the simulated mint.
    #[arg(long, default_value_t = 6)]
    pub decimals: u8,

    /// Accept unlock times that are not in the future.
    #[arg(long, env = "TIMELOCK_ALLOW_PAST_UNLOCK")]
    pub allow_past_unlock: bool,

    /// Hex-encoded Ed25519 secret for the depositor. A fresh key is
    /// generated when omitted.
    #[arg(long, env = "TIMELOCK_KEYPAIR")]
    pub keypair: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        // Ensures the derive macros produce a valid CLI definition.
        TimelockCli::command().debug_assert();
    }

    #[test]
    fn parses_token_simulation() {
        let cli = TimelockCli::try_parse_from([
            "timelock-node",
            "--log-format",
            "json",
            "simulate",
            "--token",
            "--amount",
            "5",
        ])
        .unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);
        match cli.command {
            Commands::Simulate(args) => {
                assert!(args.token);
                assert_eq!(args.amount, 5);
                assert_eq!(args.lock_secs, 60);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}

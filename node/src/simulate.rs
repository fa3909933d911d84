//! # Local Lifecycle Simulation
//!
//! Runs one vault through its whole life on a private in-memory ledger:
//! fund the depositor, lock, try to withdraw early, move the clock past the
//! unlock time, withdraw. The clock is manual, so nothing sleeps.

use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;
use std::sync::Arc;

use timelock_contracts::{
    derive_vault_address, Asset, TimelockVault, VaultConfig, VaultError, VaultEvent, Withdrawal,
};
use timelock_protocol::config::{LAMPORTS_PER_UNIT, TIMELOCK_PROGRAM_ID};
use timelock_protocol::crypto::Keypair;
use timelock_protocol::token::{create_associated_token_account, create_mint, mint_to};
use timelock_protocol::{Address, Ledger, ManualClock, RentConfig};

use crate::cli::SimulateArgs;

/// Lamports given to the simulated depositor on top of a native lock.
const STARTING_LAMPORTS: u64 = 10 * LAMPORTS_PER_UNIT;

/// What the simulation observed, printed as JSON.
#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub owner: Address,
    pub vault: Address,
    pub bump: u8,
    pub asset: Asset,
    pub amount: u64,
    pub locked_at: i64,
    pub unlock_time: i64,
    /// The error returned by the withdrawal attempted right after locking,
    /// if any.
    pub early_withdrawal: Option<String>,
    pub withdrawn_at: i64,
    pub released: u64,
    pub reclaimed_lamports: u64,
    pub events: Vec<VaultEvent>,
}

/// Runs the simulation described by `args`.
pub fn run(args: &SimulateArgs) -> Result<SimulationReport> {
    let owner = match &args.keypair {
        Some(secret) => Keypair::from_hex(secret).context("invalid --keypair")?,
        None => Keypair::generate(),
    };
    let owner_address = owner.address();

    let ledger = Arc::new(Ledger::new(RentConfig::default()));
    let clock = Arc::new(ManualClock::starting_now());
    let config = VaultConfig {
        allow_past_unlock: args.allow_past_unlock,
    };
    let program = TimelockVault::new(
        TIMELOCK_PROGRAM_ID,
        Arc::clone(&ledger),
        clock.clone(),
        config,
    );

    let native_need = if args.token { 0 } else { args.amount };
    ledger
        .airdrop(&owner_address, STARTING_LAMPORTS.saturating_add(native_need))
        .context("failed to fund depositor")?;

    let asset = if args.token {
        let mint = Address::new_unique();
        ledger
            .transact(|state| {
                create_mint(state, &owner_address, &mint, &owner_address, args.decimals)?;
                let ata =
                    create_associated_token_account(state, &owner_address, &owner_address, &mint)?;
                mint_to(state, &mint, &ata, args.amount, &owner_address)
            })
            .context("failed to set up simulated mint")?;
        tracing::info!(%mint, decimals = args.decimals, "simulated mint ready");
        Asset::Token(mint)
    } else {
        Asset::Native
    };

    let locked_at = program.now();
    let unlock_time = locked_at
        .checked_add(args.lock_secs)
        .ok_or_else(|| anyhow!("unlock time overflows"))?;
    let (vault, bump) = derive_vault_address(
        &TIMELOCK_PROGRAM_ID,
        &owner_address,
        &asset,
        args.amount,
        unlock_time,
    )?;

    match asset {
        Asset::Native => program.initialize_native_lock(&owner, args.amount, unlock_time)?,
        Asset::Token(mint) => {
            program.initialize_token_lock(&owner, args.amount, unlock_time, &mint)?
        }
    };
    tracing::info!(%vault, bump, unlock_time, "vault locked");

    let (early_withdrawal, withdrawal) = match withdraw(&program, &owner, &vault, &asset) {
        Err(err @ VaultError::VaultLocking { .. }) => {
            let remaining = unlock_time.saturating_sub(program.now()).max(0);
            clock.advance(remaining);
            tracing::info!(now = program.now(), "clock advanced to unlock time");
            (Some(err.to_string()), withdraw(&program, &owner, &vault, &asset)?)
        }
        Err(other) => return Err(other.into()),
        Ok(_) if args.lock_secs > 0 => bail!("vault opened before its unlock time"),
        Ok(withdrawal) => (None, withdrawal),
    };

    Ok(SimulationReport {
        owner: owner_address,
        vault,
        bump,
        asset,
        amount: args.amount,
        locked_at,
        unlock_time,
        early_withdrawal,
        withdrawn_at: program.now(),
        released: withdrawal.amount,
        reclaimed_lamports: withdrawal.reclaimed_lamports,
        events: program.drain_events(),
    })
}

fn withdraw(
    program: &TimelockVault,
    owner: &Keypair,
    vault: &Address,
    asset: &Asset,
) -> Result<Withdrawal, VaultError> {
    match asset {
        Asset::Native => program.withdraw_native_lock(owner, vault),
        Asset::Token(mint) => program.withdraw_token_lock(owner, vault, mint),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(token: bool) -> SimulateArgs {
        SimulateArgs {
            amount: 100_000_000,
            lock_secs: 60,
            token,
            decimals: 6,
            allow_past_unlock: false,
            keypair: None,
        }
    }

    #[test]
    fn native_simulation_runs_to_completion() {
        let report = run(&args(false)).unwrap();
        assert_eq!(report.asset, Asset::Native);
        assert_eq!(report.released, 100_000_000);
        assert!(report.early_withdrawal.is_some());
        assert!(report.withdrawn_at >= report.unlock_time);
        assert_eq!(report.events.len(), 2);
    }

    #[test]
    fn token_simulation_runs_to_completion() {
        let report = run(&args(true)).unwrap();
        assert!(matches!(report.asset, Asset::Token(_)));
        assert_eq!(report.released, 100_000_000);
        assert!(report.reclaimed_lamports > 0);
    }

    #[test]
    fn past_unlock_needs_opt_in() {
        let mut past = args(false);
        past.lock_secs = -5;
        assert!(run(&past).is_err());

        past.allow_past_unlock = true;
        let report = run(&past).unwrap();
        assert!(report.early_withdrawal.is_none());
    }

    #[test]
    fn fixed_keypair_is_used() {
        let secret = hex::encode([7u8; 32]);
        let mut with_key = args(false);
        with_key.keypair = Some(secret);
        let report = run(&with_key).unwrap();
        assert_eq!(report.owner, Keypair::from_seed(&[7u8; 32]).address());
    }
}

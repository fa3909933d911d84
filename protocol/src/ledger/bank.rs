//! # Shared Ledger Handle
//!
//! [`Ledger`] wraps a [`LedgerState`] behind a `parking_lot::RwLock` and is
//! the only way programs touch balances. Reads take the shared lock; every
//! mutation goes through [`Ledger::transact`], which holds the write lock for
//! the whole operation and commits a scratch copy only on success.

use parking_lot::RwLock;

use super::account::Account;
use super::error::LedgerError;
use super::rent::RentConfig;
use super::state::LedgerState;
use crate::address::Address;

/// A thread-safe, all-or-nothing ledger.
#[derive(Debug, Default)]
pub struct Ledger {
    state: RwLock<LedgerState>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new(rent: RentConfig) -> Self {
        Self {
            state: RwLock::new(LedgerState::new(rent)),
        }
    }

    /// Runs `op` against a scratch copy of the state and commits the copy if
    /// `op` succeeds. On error the live state is untouched.
    ///
    /// Scopes are serialized: two concurrent `transact` calls never
    /// interleave, so a check made inside `op` still holds when it commits.
    pub fn transact<T, E>(
        &self,
        op: impl FnOnce(&mut LedgerState) -> Result<T, E>,
    ) -> Result<T, E> {
        let mut live = self.state.write();
        let mut scratch = live.clone();
        match op(&mut scratch) {
            Ok(value) => {
                *live = scratch;
                Ok(value)
            }
            Err(err) => {
                tracing::debug!("ledger scope rolled back");
                Err(err)
            }
        }
    }

    /// Runs a read-only closure against the live state.
    pub fn read<T>(&self, op: impl FnOnce(&LedgerState) -> T) -> T {
        op(&self.state.read())
    }

    /// Lamports at `address`; zero if absent.
    pub fn lamports(&self, address: &Address) -> u64 {
        self.state.read().lamports(address)
    }

    /// A copy of the account at `address`, if it exists.
    pub fn account(&self, address: &Address) -> Option<Account> {
        self.state.read().account(address).cloned()
    }

    /// Returns `true` if an account exists at `address`.
    pub fn exists(&self, address: &Address) -> bool {
        self.state.read().exists(address)
    }

    /// Minimum balance for an account of `space` bytes.
    pub fn minimum_balance(&self, space: usize) -> u64 {
        self.state.read().minimum_balance(space)
    }

    /// Faucet: credits a wallet directly. Returns the new balance.
    pub fn airdrop(&self, address: &Address, lamports: u64) -> Result<u64, LedgerError> {
        self.transact(|state| state.airdrop(address, lamports))
    }
}

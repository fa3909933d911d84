//! # Ledger State
//!
//! The account map plus the three primitive moves every program is built
//! from:
//!
//! 1. **transfer** — move lamports between accounts. The source must be
//!    debitable by the authority: a signer debits its own wallet, a program
//!    debits accounts it owns.
//! 2. **allocate** — create an account at an unoccupied address, funding its
//!    allocation reserve from a payer.
//! 3. **close** — destroy an account and sweep its entire balance to a
//!    destination. Only the owning program can close.
//!
//! None of these are atomic on their own; atomicity comes from running them
//! inside [`Ledger::transact`](super::Ledger::transact).

use std::collections::HashMap;

use super::account::{Account, Authority};
use super::error::LedgerError;
use super::rent::RentConfig;
use crate::address::Address;
use crate::config::SYSTEM_PROGRAM_ID;

/// The complete set of accounts, keyed by address.
#[derive(Clone, Debug, Default)]
pub struct LedgerState {
    accounts: HashMap<Address, Account>,
    rent: RentConfig,
}

impl LedgerState {
    /// Creates an empty state with the given reserve parameters.
    pub fn new(rent: RentConfig) -> Self {
        Self {
            accounts: HashMap::new(),
            rent,
        }
    }

    /// The reserve parameters in force.
    pub fn rent(&self) -> &RentConfig {
        &self.rent
    }

    /// Minimum balance for an account of `space` bytes.
    pub fn minimum_balance(&self, space: usize) -> u64 {
        self.rent.minimum_balance(space)
    }

    /// Returns the account at `address`, if any.
    pub fn account(&self, address: &Address) -> Option<&Account> {
        self.accounts.get(address)
    }

    /// Returns `true` if an account exists at `address`.
    pub fn exists(&self, address: &Address) -> bool {
        self.accounts.contains_key(address)
    }

    /// Lamports held at `address`; zero for missing accounts.
    pub fn lamports(&self, address: &Address) -> u64 {
        self.accounts.get(address).map_or(0, |a| a.lamports)
    }

    /// Read-only view of an account's data.
    pub fn data(&self, address: &Address) -> Result<&[u8], LedgerError> {
        self.accounts
            .get(address)
            .map(|a| a.data.as_slice())
            .ok_or(LedgerError::AccountNotFound(*address))
    }

    /// Mutable view of an account's data, granted only to its owner program.
    pub fn data_mut(
        &mut self,
        address: &Address,
        program_id: &Address,
    ) -> Result<&mut [u8], LedgerError> {
        let account = self
            .accounts
            .get_mut(address)
            .ok_or(LedgerError::AccountNotFound(*address))?;
        if account.owner != *program_id {
            return Err(LedgerError::OwnerMismatch {
                account: *address,
                expected: *program_id,
                actual: account.owner,
            });
        }
        Ok(account.data.as_mut_slice())
    }

    /// Credits `lamports` to a wallet out of thin air, creating it if needed.
    ///
    /// This is the faucet used to seed test and simulation identities; no
    /// program path calls it.
    pub fn airdrop(&mut self, address: &Address, lamports: u64) -> Result<u64, LedgerError> {
        let account = self
            .accounts
            .entry(*address)
            .or_insert_with(|| Account::wallet(0));
        account.lamports = account
            .lamports
            .checked_add(lamports)
            .ok_or(LedgerError::Overflow)?;
        Ok(account.lamports)
    }

    /// Moves `amount` lamports from `from` to `to`.
    ///
    /// The authority must resolve to `from`, and `from` must be owned by the
    /// program the authority debits for (the system program for signers).
    /// A missing destination is created as an empty wallet.
    pub fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        amount: u64,
        authority: &Authority<'_>,
    ) -> Result<(), LedgerError> {
        let actual = authority.resolve()?;
        if actual != *from {
            return Err(LedgerError::AuthorityMismatch {
                expected: *from,
                actual,
            });
        }
        self.debit(from, amount, &authority.debiting_program())?;
        self.credit(to, amount)
    }

    /// Allocates `space` bytes at `location` owned by `owner`, funding the
    /// reserve from `payer`'s wallet. Returns the lamports charged to `payer`.
    ///
    /// A location that only holds a plain, data-less wallet balance (someone
    /// sent lamports to it ahead of time) is adopted: the payer tops it up to
    /// the reserve. Anything else at the location is `AccountInUse`.
    pub fn allocate(
        &mut self,
        payer: &Address,
        location: &Address,
        space: usize,
        owner: &Address,
    ) -> Result<u64, LedgerError> {
        let prefunded = match self.accounts.get(location) {
            None => 0,
            Some(existing) if existing.is_wallet() && existing.data.is_empty() => {
                existing.lamports
            }
            Some(_) => return Err(LedgerError::AccountInUse(*location)),
        };
        let reserve = self.minimum_balance(space);
        let charged = reserve.saturating_sub(prefunded);
        if charged > 0 {
            self.debit(payer, charged, &SYSTEM_PROGRAM_ID)?;
        }
        self.accounts.insert(
            *location,
            Account::allocated(prefunded + charged, space, *owner),
        );
        tracing::trace!(%location, %owner, space, charged, "account allocated");
        Ok(charged)
    }

    /// Destroys the account at `location` and sweeps every lamport it held
    /// to `destination`. Returns the amount swept.
    pub fn close(
        &mut self,
        location: &Address,
        destination: &Address,
        program_id: &Address,
    ) -> Result<u64, LedgerError> {
        let account = self
            .accounts
            .get(location)
            .ok_or(LedgerError::AccountNotFound(*location))?;
        if account.owner != *program_id {
            return Err(LedgerError::OwnerMismatch {
                account: *location,
                expected: *program_id,
                actual: account.owner,
            });
        }
        let swept = account.lamports;
        self.accounts.remove(location);
        self.credit(destination, swept)?;
        tracing::trace!(%location, %destination, swept, "account closed");
        Ok(swept)
    }

    fn debit(
        &mut self,
        address: &Address,
        amount: u64,
        program_id: &Address,
    ) -> Result<(), LedgerError> {
        let account = self
            .accounts
            .get_mut(address)
            .ok_or(LedgerError::AccountNotFound(*address))?;
        if account.owner != *program_id {
            return Err(LedgerError::OwnerMismatch {
                account: *address,
                expected: *program_id,
                actual: account.owner,
            });
        }
        account.lamports =
            account
                .lamports
                .checked_sub(amount)
                .ok_or(LedgerError::InsufficientLamports {
                    account: *address,
                    available: account.lamports,
                    required: amount,
                })?;
        Ok(())
    }

    fn credit(&mut self, address: &Address, amount: u64) -> Result<(), LedgerError> {
        let account = self
            .accounts
            .entry(*address)
            .or_insert_with(|| Account::wallet(0));
        account.lamports = account
            .lamports
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        Ok(())
    }
}

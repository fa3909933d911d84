//! # Timelock Vault
//!
//! The vault lifecycle over a shared [`Ledger`]:
//!
//! ```text
//!   Uninitialized ──initialize──▶ Locked ──withdraw (owner, now ≥ unlock)──▶ Withdrawn
//! ```
//!
//! "Withdrawn" is not a stored state: the record and every account it owned
//! are destroyed, so the location reads as empty again. Each operation is a
//! single [`Ledger::transact`] scope and reads the clock exactly once,
//! before the scope opens.
//!
//! ## Custody layout
//!
//! - **Native**: the record account holds its allocation reserve plus the
//!   locked principal.
//! - **Token**: the record account holds only its reserve; the principal
//!   sits in the associated token account of the vault address, which only
//!   the vault program can sign for.

use parking_lot::Mutex;
use std::sync::Arc;

use timelock_protocol::config::TOKEN_ACCOUNT_SPACE;
use timelock_protocol::crypto::Keypair;
use timelock_protocol::token::{
    close_account, create_associated_token_account, get_associated_token_address, load_mint,
    load_token_account,
};
use timelock_protocol::{Address, Authority, Clock, Ledger, LedgerError, LedgerState};

use crate::config::VaultConfig;
use crate::derivation::{derive_vault_address, verify_vault_address, VaultSeeds};
use crate::error::VaultError;
use crate::events::VaultEvent;
use crate::state::{Asset, VaultRecord, VAULT_RECORD_SPACE};
use crate::transfer::{AssetTransfer, NativeTransfer, TokenTransfer};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Outcome of a successful withdrawal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Withdrawal {
    /// The destroyed vault location.
    pub vault: Address,
    /// The depositor the funds went back to.
    pub owner: Address,
    /// The asset released.
    pub asset: Asset,
    /// Units released to the owner. For token vaults this is the full
    /// sub-custody balance, which is never below the committed amount.
    pub amount: u64,
    /// Allocation reserves returned to the owner when the vault's accounts
    /// were closed.
    pub reclaimed_lamports: u64,
}

/// The vault program bound to one ledger and one clock.
pub struct TimelockVault {
    program_id: Address,
    ledger: Arc<Ledger>,
    clock: Arc<dyn Clock>,
    config: VaultConfig,
    events: Mutex<Vec<VaultEvent>>,
}

impl std::fmt::Debug for TimelockVault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimelockVault")
            .field("program_id", &self.program_id)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Implementation
// ---------------------------------------------------------------------------

impl TimelockVault {
    /// Binds the program `program_id` to a ledger and clock.
    pub fn new(
        program_id: Address,
        ledger: Arc<Ledger>,
        clock: Arc<dyn Clock>,
        config: VaultConfig,
    ) -> Self {
        Self {
            program_id,
            ledger,
            clock,
            config,
            events: Mutex::new(Vec::new()),
        }
    }

    /// The program id vaults are derived under and owned by.
    pub fn program_id(&self) -> &Address {
        &self.program_id
    }

    /// The ledger this program runs against.
    pub fn ledger(&self) -> &Arc<Ledger> {
        &self.ledger
    }

    /// Current clock reading.
    pub fn now(&self) -> i64 {
        self.clock.unix_timestamp()
    }

    /// Locks `amount` of the native currency until `unlock_time`.
    ///
    /// The signer pays the record's allocation reserve on top of `amount`.
    pub fn initialize_native_lock(
        &self,
        signer: &Keypair,
        amount: u64,
        unlock_time: i64,
    ) -> Result<VaultRecord, VaultError> {
        let owner = signer.address();
        let now = self.now();
        let (vault, bump) =
            derive_vault_address(&self.program_id, &owner, &Asset::Native, amount, unlock_time)?;
        let record =
            VaultRecord::new(owner, Asset::Native, amount, unlock_time, bump, now, &self.config)?;

        self.ledger.transact(|state| -> Result<_, VaultError> {
            ensure_vacant(state, &vault)?;
            let reserve = state.minimum_balance(VAULT_RECORD_SPACE);
            let required = reserve.checked_add(amount).ok_or(LedgerError::Overflow)?;
            ensure_lamports(state, &owner, required)?;

            self.open_record(state, &owner, &vault, &record)?;
            NativeTransfer.move_funds(state, &owner, &vault, amount, &Authority::Signer(owner))
        })?;

        self.emit_initialized(&vault, &record);
        Ok(record)
    }

    /// Locks `amount` tokens of `mint` until `unlock_time`.
    ///
    /// The tokens move from the signer's associated token account into the
    /// vault's own associated token account, which is created here unless it
    /// already exists.
    pub fn initialize_token_lock(
        &self,
        signer: &Keypair,
        amount: u64,
        unlock_time: i64,
        mint: &Address,
    ) -> Result<VaultRecord, VaultError> {
        let owner = signer.address();
        let asset = Asset::Token(*mint);
        let now = self.now();
        let (vault, bump) =
            derive_vault_address(&self.program_id, &owner, &asset, amount, unlock_time)?;
        let record = VaultRecord::new(owner, asset, amount, unlock_time, bump, now, &self.config)?;

        self.ledger.transact(|state| -> Result<_, VaultError> {
            ensure_vacant(state, &vault)?;
            let decimals = load_mint(state, mint)?.decimals;
            let owner_ata = associated_address(&owner, mint)?;
            let vault_ata = associated_address(&vault, mint)?;

            if !state.exists(&owner_ata) {
                return Err(VaultError::InsufficientFunds {
                    required: amount,
                    available: 0,
                });
            }

            let mut reserves = state.minimum_balance(VAULT_RECORD_SPACE);
            if !state.exists(&vault_ata) {
                reserves = reserves
                    .checked_add(state.minimum_balance(TOKEN_ACCOUNT_SPACE))
                    .ok_or(LedgerError::Overflow)?;
            }
            ensure_lamports(state, &owner, reserves)?;

            self.open_record(state, &owner, &vault, &record)?;
            if state.exists(&vault_ata) {
                load_token_account(state, &vault_ata)?;
            } else {
                create_associated_token_account(state, &owner, &vault, mint)?;
            }

            let adapter = TokenTransfer {
                mint: *mint,
                decimals,
            };
            adapter.move_funds(state, &owner_ata, &vault_ata, amount, &Authority::Signer(owner))
        })?;

        self.emit_initialized(&vault, &record);
        Ok(record)
    }

    /// Returns a native vault's principal and reserve to its owner and
    /// destroys it.
    pub fn withdraw_native_lock(
        &self,
        signer: &Keypair,
        vault: &Address,
    ) -> Result<Withdrawal, VaultError> {
        let owner = signer.address();
        let now = self.now();

        let withdrawal = self.ledger.transact(|state| -> Result<_, VaultError> {
            let record = self.authorize_withdrawal(state, &owner, vault, &Asset::Native, now)?;
            let material = VaultSeeds::new(&owner, &Asset::Native, record.amount, record.unlock_time)
                .with_bump(record.bump);
            let seeds = material.signer_seeds();
            let authority = Authority::Program {
                program_id: self.program_id,
                seeds: &seeds,
            };

            NativeTransfer.move_funds(state, vault, &owner, record.amount, &authority)?;
            let reclaimed = state.close(vault, &owner, &self.program_id)?;

            Ok(Withdrawal {
                vault: *vault,
                owner,
                asset: Asset::Native,
                amount: record.amount,
                reclaimed_lamports: reclaimed,
            })
        })?;

        self.emit_withdrawn(&withdrawal);
        Ok(withdrawal)
    }

    /// Returns a token vault's tokens and both reserves to its owner and
    /// destroys the vault and its token account.
    ///
    /// The owner's associated token account is created, at the owner's
    /// expense, if it no longer exists.
    pub fn withdraw_token_lock(
        &self,
        signer: &Keypair,
        vault: &Address,
        mint: &Address,
    ) -> Result<Withdrawal, VaultError> {
        let owner = signer.address();
        let asset = Asset::Token(*mint);
        let now = self.now();

        let withdrawal = self.ledger.transact(|state| -> Result<_, VaultError> {
            let record = self.authorize_withdrawal(state, &owner, vault, &asset, now)?;
            let material = VaultSeeds::new(&owner, &asset, record.amount, record.unlock_time)
                .with_bump(record.bump);
            let seeds = material.signer_seeds();
            let authority = Authority::Program {
                program_id: self.program_id,
                seeds: &seeds,
            };

            let decimals = load_mint(state, mint)?.decimals;
            let vault_ata = associated_address(vault, mint)?;
            let owner_ata = associated_address(&owner, mint)?;
            let held = load_token_account(state, &vault_ata)?.amount;

            if !state.exists(&owner_ata) {
                create_associated_token_account(state, &owner, &owner, mint)?;
            }

            let adapter = TokenTransfer {
                mint: *mint,
                decimals,
            };
            adapter.move_funds(state, &vault_ata, &owner_ata, held, &authority)?;
            let from_token_account = close_account(state, &vault_ata, &owner, &authority)?;
            let from_record = state.close(vault, &owner, &self.program_id)?;
            let reclaimed = from_token_account
                .checked_add(from_record)
                .ok_or(LedgerError::Overflow)?;

            Ok(Withdrawal {
                vault: *vault,
                owner,
                asset,
                amount: held,
                reclaimed_lamports: reclaimed,
            })
        })?;

        self.emit_withdrawn(&withdrawal);
        Ok(withdrawal)
    }

    /// The record at `vault`, if one is there.
    pub fn fetch_vault(&self, vault: &Address) -> Option<VaultRecord> {
        self.ledger
            .read(|state| VaultRecord::load(state, vault, &self.program_id).ok())
    }

    /// Whether `record` can be withdrawn at the current clock reading.
    pub fn is_unlocked(&self, record: &VaultRecord) -> bool {
        record.is_unlocked(self.now())
    }

    /// Takes every event recorded since the last drain, oldest first.
    pub fn drain_events(&self) -> Vec<VaultEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn open_record(
        &self,
        state: &mut LedgerState,
        owner: &Address,
        vault: &Address,
        record: &VaultRecord,
    ) -> Result<(), VaultError> {
        state.allocate(owner, vault, VAULT_RECORD_SPACE, &self.program_id)?;
        record.store(state, vault, &self.program_id)
    }

    /// Loads the record and runs the withdrawal checks in their fixed order:
    /// ownership, then time, then derivation.
    fn authorize_withdrawal(
        &self,
        state: &LedgerState,
        signer: &Address,
        vault: &Address,
        asset: &Asset,
        now: i64,
    ) -> Result<VaultRecord, VaultError> {
        let record = VaultRecord::load(state, vault, &self.program_id)?;

        if record.owner != *signer {
            return Err(VaultError::Unauthorized {
                owner: record.owner,
                signer: *signer,
            });
        }
        if !record.is_unlocked(now) {
            return Err(VaultError::VaultLocking {
                unlock_time: record.unlock_time,
                now,
            });
        }
        if record.asset != *asset {
            return Err(VaultError::InvalidDerivation(*vault));
        }
        let material = VaultSeeds::new(signer, asset, record.amount, record.unlock_time)
            .with_bump(record.bump);
        verify_vault_address(&self.program_id, vault, &material)?;

        Ok(record)
    }

    fn emit_initialized(&self, vault: &Address, record: &VaultRecord) {
        tracing::info!(
            %vault,
            owner = %record.owner,
            asset = %record.asset,
            amount = record.amount,
            unlock_time = record.unlock_time,
            "vault initialized"
        );
        self.events.lock().push(VaultEvent::Initialized {
            vault: *vault,
            owner: record.owner,
            amount: record.amount,
            unlock_time: record.unlock_time,
            asset: record.asset,
        });
    }

    fn emit_withdrawn(&self, withdrawal: &Withdrawal) {
        tracing::info!(
            vault = %withdrawal.vault,
            owner = %withdrawal.owner,
            asset = %withdrawal.asset,
            amount = withdrawal.amount,
            reclaimed = withdrawal.reclaimed_lamports,
            "vault withdrawn"
        );
        self.events.lock().push(VaultEvent::Withdrawn {
            vault: withdrawal.vault,
            owner: withdrawal.owner,
            amount: withdrawal.amount,
            asset: withdrawal.asset,
        });
    }
}

fn associated_address(wallet: &Address, mint: &Address) -> Result<Address, VaultError> {
    get_associated_token_address(wallet, mint).map_err(|err| VaultError::from(LedgerError::from(err)))
}

/// A vault location is free when nothing is there, or only a plain wallet
/// balance that allocation will adopt.
fn ensure_vacant(state: &LedgerState, vault: &Address) -> Result<(), VaultError> {
    match state.account(vault) {
        Some(account) if !(account.is_wallet() && account.data.is_empty()) => {
            Err(VaultError::LocationOccupied(*vault))
        }
        _ => Ok(()),
    }
}

fn ensure_lamports(state: &LedgerState, owner: &Address, required: u64) -> Result<(), VaultError> {
    let available = state.lamports(owner);
    if available < required {
        return Err(VaultError::InsufficientFunds {
            required,
            available,
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! # Vault Record
//!
//! The persistent custody record. One record lives at each vault address,
//! laid out as an 8-byte type tag followed by the fields in this order:
//!
//! ```text
//! owner        32 bytes
//! asset         4-byte variant tag + 32-byte mint (Token) or nothing (Native)
//! amount        u64 little-endian
//! unlock_time   i64 little-endian
//! bump          u8
//! ```
//!
//! The account is always allocated at [`VAULT_RECORD_SPACE`] bytes so that
//! native and token vaults cost the same reserve.

use serde::{Deserialize, Serialize};
use std::fmt;

use timelock_protocol::crypto::hash::account_discriminator;
use timelock_protocol::ledger::{read_record, write_record};
use timelock_protocol::{Address, LedgerState};

use crate::config::VaultConfig;
use crate::error::VaultError;

/// Allocated size of a vault record: tag + owner + asset + amount +
/// unlock_time + bump.
pub const VAULT_RECORD_SPACE: usize = 8 + 32 + (4 + 32) + 8 + 8 + 1;

/// Which fungible asset a vault holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Asset {
    /// The ledger's base currency, held directly in the record's balance.
    Native,
    /// A token of the given mint, held in the vault's sub-custody account.
    Token(Address),
}

impl Asset {
    /// The mint, for token vaults.
    pub fn mint(&self) -> Option<&Address> {
        match self {
            Asset::Native => None,
            Asset::Token(mint) => Some(mint),
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Asset::Native => write!(f, "native"),
            Asset::Token(mint) => write!(f, "token:{}", mint),
        }
    }
}

/// A single locked deposit.
///
/// Every field is written once at creation and never changed. The record
/// disappears entirely on withdrawal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultRecord {
    /// The depositor, and the only identity allowed to withdraw.
    pub owner: Address,
    /// The asset held.
    pub asset: Asset,
    /// Committed principal in the asset's smallest unit.
    pub amount: u64,
    /// Unix timestamp (seconds) from which withdrawal is allowed.
    pub unlock_time: i64,
    /// Canonical derivation bump of the vault address.
    pub bump: u8,
}

impl VaultRecord {
    /// Type tag name used for the record discriminator.
    pub const RECORD_NAME: &'static str = "VaultRecord";

    /// Validates creation parameters against `now` and builds the record.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidInput`] if `amount` is zero, or if
    /// `unlock_time <= now` and the config does not allow past-dated locks.
    pub fn new(
        owner: Address,
        asset: Asset,
        amount: u64,
        unlock_time: i64,
        bump: u8,
        now: i64,
        config: &VaultConfig,
    ) -> Result<Self, VaultError> {
        if amount == 0 {
            return Err(VaultError::InvalidInput(
                "amount must be greater than zero".into(),
            ));
        }
        if unlock_time <= now && !config.allow_past_unlock {
            return Err(VaultError::InvalidInput(format!(
                "unlock time {unlock_time} must be in the future (now {now})"
            )));
        }
        Ok(Self {
            owner,
            asset,
            amount,
            unlock_time,
            bump,
        })
    }

    /// `true` once `now` has reached the unlock time.
    pub fn is_unlocked(&self, now: i64) -> bool {
        now >= self.unlock_time
    }

    /// Reads the record stored at `vault`.
    ///
    /// A missing account, or one not owned by `program_id`, is
    /// [`VaultError::NotFound`]. A program-owned account that fails to
    /// decode is [`VaultError::InvalidAccountData`].
    pub fn load(
        state: &LedgerState,
        vault: &Address,
        program_id: &Address,
    ) -> Result<Self, VaultError> {
        let account = state
            .account(vault)
            .filter(|account| account.owner == *program_id)
            .ok_or(VaultError::NotFound(*vault))?;
        read_record(vault, &account.data, account_discriminator(Self::RECORD_NAME))
            .map_err(|_| VaultError::InvalidAccountData(*vault))
    }

    /// Writes this record into the already-allocated account at `vault`.
    pub fn store(
        &self,
        state: &mut LedgerState,
        vault: &Address,
        program_id: &Address,
    ) -> Result<(), VaultError> {
        let data = state.data_mut(vault, program_id)?;
        write_record(vault, data, account_discriminator(Self::RECORD_NAME), self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use timelock_protocol::RentConfig;

    fn sample(asset: Asset) -> VaultRecord {
        VaultRecord {
            owner: Address::new_unique(),
            asset,
            amount: 100_000_000,
            unlock_time: 1_700_000_060,
            bump: 254,
        }
    }

    #[test]
    fn largest_record_fits_allocated_space() {
        let record = sample(Asset::Token(Address::new_unique()));
        let encoded = bincode::serialized_size(&record).unwrap() as usize;
        assert_eq!(8 + encoded, VAULT_RECORD_SPACE);
    }

    #[test]
    fn zero_amount_rejected() {
        let err = VaultRecord::new(
            Address::new_unique(),
            Asset::Native,
            0,
            2_000,
            255,
            1_000,
            &VaultConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, VaultError::InvalidInput(_)));
    }

    #[test]
    fn past_unlock_depends_on_config() {
        let owner = Address::new_unique();
        let strict = VaultConfig::default();
        let lenient = VaultConfig {
            allow_past_unlock: true,
        };
        assert!(VaultRecord::new(owner, Asset::Native, 1, 1_000, 255, 1_000, &strict).is_err());
        assert!(VaultRecord::new(owner, Asset::Native, 1, 999, 255, 1_000, &lenient).is_ok());
        assert!(VaultRecord::new(owner, Asset::Native, 1, 1_001, 255, 1_000, &strict).is_ok());
    }

    #[test]
    fn unlock_predicate_is_inclusive() {
        let record = sample(Asset::Native);
        assert!(!record.is_unlocked(record.unlock_time - 1));
        assert!(record.is_unlocked(record.unlock_time));
        assert!(record.is_unlocked(record.unlock_time + 1));
    }

    #[test]
    fn load_distinguishes_missing_from_undecodable() {
        let program_id = Address::new_unique();
        let payer = Address::new_unique();
        let vault = Address::new_unique();
        let mut state = LedgerState::new(RentConfig::default());
        state.airdrop(&payer, 1_000_000_000).unwrap();

        assert_eq!(
            VaultRecord::load(&state, &vault, &program_id),
            Err(VaultError::NotFound(vault))
        );

        // Allocated but never written: the tag is all zeroes.
        state
            .allocate(&payer, &vault, VAULT_RECORD_SPACE, &program_id)
            .unwrap();
        assert_eq!(
            VaultRecord::load(&state, &vault, &program_id),
            Err(VaultError::InvalidAccountData(vault))
        );
        // Under any other program it is simply not a vault.
        assert_eq!(
            VaultRecord::load(&state, &vault, &Address::new_unique()),
            Err(VaultError::NotFound(vault))
        );

        let record = sample(Asset::Native);
        record.store(&mut state, &vault, &program_id).unwrap();
        assert_eq!(VaultRecord::load(&state, &vault, &program_id), Ok(record));
    }

    #[test]
    fn asset_display() {
        assert_eq!(Asset::Native.to_string(), "native");
        let mint = Address::new_unique();
        assert_eq!(Asset::Token(mint).to_string(), format!("token:{mint}"));
        assert_eq!(Asset::Token(mint).mint(), Some(&mint));
    }
}

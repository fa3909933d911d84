//! # Asset Adapters
//!
//! The state machine moves funds through one capability, [`AssetTransfer`],
//! and does not care which asset sits behind it.

use timelock_protocol::token::transfer_checked;
use timelock_protocol::{Address, Authority, LedgerState};

use crate::error::VaultError;

/// Moves `amount` of one asset between two custody locations.
///
/// `from` and `to` are the locations that actually hold the balance: wallets
/// and records for the native currency, token accounts for tokens.
pub trait AssetTransfer {
    /// Moves the funds inside the caller's ledger scope.
    fn move_funds(
        &self,
        state: &mut LedgerState,
        from: &Address,
        to: &Address,
        amount: u64,
        authority: &Authority<'_>,
    ) -> Result<(), VaultError>;
}

/// The ledger's base currency.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeTransfer;

impl AssetTransfer for NativeTransfer {
    fn move_funds(
        &self,
        state: &mut LedgerState,
        from: &Address,
        to: &Address,
        amount: u64,
        authority: &Authority<'_>,
    ) -> Result<(), VaultError> {
        state.transfer(from, to, amount, authority)?;
        Ok(())
    }
}

/// Tokens of one mint, moved with a decimals check.
#[derive(Debug, Clone, Copy)]
pub struct TokenTransfer {
    /// The mint both token accounts must hold.
    pub mint: Address,
    /// The mint's decimals, checked on every transfer.
    pub decimals: u8,
}

impl AssetTransfer for TokenTransfer {
    fn move_funds(
        &self,
        state: &mut LedgerState,
        from: &Address,
        to: &Address,
        amount: u64,
        authority: &Authority<'_>,
    ) -> Result<(), VaultError> {
        transfer_checked(state, from, &self.mint, to, amount, self.decimals, authority)?;
        Ok(())
    }
}

//! Error types for token operations.

use thiserror::Error;

use crate::address::Address;
use crate::ledger::LedgerError;

/// Errors raised by the token program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// An underlying balance or allocation failure.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The account exists but is not a token account of the expected mint.
    #[error("token account {account} holds mint {actual}, expected {expected}")]
    MintMismatch {
        /// The token account.
        account: Address,
        /// The mint the caller named.
        expected: Address,
        /// The mint the account actually holds.
        actual: Address,
    },

    /// `transfer_checked` was given the wrong decimal precision.
    #[error("mint decimals mismatch: mint has {actual}, caller supplied {supplied}")]
    DecimalsMismatch {
        /// The mint's precision.
        actual: u8,
        /// What the caller asserted.
        supplied: u8,
    },

    /// Debit larger than the token balance.
    #[error("insufficient token balance in {account}: available {available}, required {required}")]
    InsufficientFunds {
        /// The token account being debited.
        account: Address,
        /// Its balance.
        available: u64,
        /// What the operation needed.
        required: u64,
    },

    /// The authority does not control the token account or mint.
    #[error("authority {actual} does not control {account} (owner {expected})")]
    OwnerMismatch {
        /// The token account or mint.
        account: Address,
        /// Its controlling authority.
        expected: Address,
        /// The address the authority resolved to.
        actual: Address,
    },

    /// Only empty token accounts may be closed.
    #[error("token account {account} still holds {amount} units")]
    NonZeroBalance {
        /// The token account.
        account: Address,
        /// Its remaining balance.
        amount: u64,
    },

    /// Supply or balance would exceed `u64::MAX`.
    #[error("token arithmetic overflow")]
    Overflow,
}

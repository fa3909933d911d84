//! # Vault Errors
//!
//! Every failure is reported synchronously and leaves no partial state.
//! Nothing is retried internally; a caller that hit `VaultLocking` can try
//! again once the unlock time has passed.

use thiserror::Error;
use timelock_protocol::token::TokenError;
use timelock_protocol::{Address, DerivationError, LedgerError};

/// Errors that can occur during vault operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VaultError {
    /// Rejected parameters: zero amount, or an unlock time already in the
    /// past when past-dated locks are disabled.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A record already exists at the derived vault address.
    #[error("vault location {0} is already occupied")]
    LocationOccupied(Address),

    /// No bump in 255..=0 produced an off-curve vault address.
    #[error("vault address derivation exhausted every bump")]
    DerivationExhausted,

    /// The signer is not the vault's owner.
    #[error("unauthorized: vault belongs to {owner}, request signed by {signer}")]
    Unauthorized {
        /// The depositor recorded in the vault.
        owner: Address,
        /// Who signed the withdrawal.
        signer: Address,
    },

    /// Withdrawal attempted before the unlock time.
    #[error("vault is locking until {unlock_time} (now {now})")]
    VaultLocking {
        /// When the vault opens.
        unlock_time: i64,
        /// The clock reading used for the check.
        now: i64,
    },

    /// The supplied vault address does not re-derive from the record, the
    /// signer and the supplied asset.
    #[error("vault address {0} does not match its derivation")]
    InvalidDerivation(Address),

    /// No vault record at the address (never created, or already withdrawn).
    #[error("no vault at {0}")]
    NotFound(Address),

    /// The depositor lacks the amount or the reserves needed.
    #[error("insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        /// What the operation needed.
        required: u64,
        /// What the depositor held.
        available: u64,
    },

    /// The vault address holds data this program cannot decode.
    #[error("vault {0} holds undecodable data")]
    InvalidAccountData(Address),

    /// Any other ledger failure.
    #[error("ledger error: {0}")]
    Ledger(LedgerError),

    /// Any other token-accounting failure.
    #[error("token error: {0}")]
    Token(TokenError),
}

impl From<LedgerError> for VaultError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::AccountInUse(location) => VaultError::LocationOccupied(location),
            LedgerError::Derivation(DerivationError::Exhausted) => VaultError::DerivationExhausted,
            LedgerError::InsufficientLamports {
                available,
                required,
                ..
            } => VaultError::InsufficientFunds {
                required,
                available,
            },
            other => VaultError::Ledger(other),
        }
    }
}

impl From<TokenError> for VaultError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Ledger(inner) => inner.into(),
            TokenError::InsufficientFunds {
                available,
                required,
                ..
            } => VaultError::InsufficientFunds {
                required,
                available,
            },
            other => VaultError::Token(other),
        }
    }
}

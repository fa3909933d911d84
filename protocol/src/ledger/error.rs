//! Error types for ledger operations.

use thiserror::Error;

use crate::address::Address;
use crate::derivation::DerivationError;

/// Errors that can occur while applying balance and allocation changes.
///
/// Any of these aborts the enclosing [`transact`](super::Ledger::transact)
/// scope with no state change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Allocation targeted an address that already holds an account.
    #[error("account {0} already in use")]
    AccountInUse(Address),

    /// The referenced account does not exist.
    #[error("account {0} not found")]
    AccountNotFound(Address),

    /// Debit larger than the available balance.
    #[error("insufficient lamports in {account}: available {available}, required {required}")]
    InsufficientLamports {
        /// The account being debited.
        account: Address,
        /// Its current balance.
        available: u64,
        /// What the operation needed.
        required: u64,
    },

    /// The account is owned by a different program than the one acting on it.
    #[error("account {account} is owned by {actual}, expected {expected}")]
    OwnerMismatch {
        /// The account in question.
        account: Address,
        /// The program that tried to act on it.
        expected: Address,
        /// Its real owner.
        actual: Address,
    },

    /// The supplied authority does not control the account.
    #[error("authority {actual} cannot act for {expected}")]
    AuthorityMismatch {
        /// The address that needed to authorize.
        expected: Address,
        /// The address the authority resolved to.
        actual: Address,
    },

    /// A balance would exceed `u64::MAX`.
    #[error("lamport arithmetic overflow")]
    Overflow,

    /// Program-signed authority with seeds that do not derive.
    #[error("authority derivation failed: {0}")]
    Derivation(#[from] DerivationError),

    /// Account data is too small, mistagged or undecodable.
    #[error("invalid account data in {account}: {reason}")]
    InvalidAccountData {
        /// The account whose data was rejected.
        account: Address,
        /// What was wrong with it.
        reason: String,
    },
}

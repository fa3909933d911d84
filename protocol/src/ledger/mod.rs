//! # Ledger — Balances, Allocation and Atomic Scopes
//!
//! The ledger is the execution environment the vault program runs against.
//! It maps addresses to [`Account`]s, each holding a native balance
//! (lamports), an owner program and a fixed-size data buffer.
//!
//! ```text
//! account.rs — Account and Authority (who may debit what)
//! rent.rs    — allocation reserve: the minimum balance an account must hold
//! record.rs  — tagged, fixed-size typed records inside account data
//! state.rs   — LedgerState: transfer, allocate, close
//! bank.rs    — Ledger: the shared handle with all-or-nothing `transact`
//! error.rs   — LedgerError
//! ```
//!
//! ## Atomicity
//!
//! Every mutating operation happens inside [`Ledger::transact`]. The closure
//! works on a scratch copy of the state; the copy replaces the live state
//! only if the closure returns `Ok`. An error anywhere inside leaves the
//! ledger exactly as it was. Scopes are serialized by a write lock, so no
//! operation ever observes another one half-done.

pub mod account;
pub mod bank;
pub mod error;
pub mod record;
pub mod rent;
pub mod state;

pub use account::{Account, Authority};
pub use bank::Ledger;
pub use error::LedgerError;
pub use record::{read_record, write_record};
pub use rent::RentConfig;
pub use state::LedgerState;

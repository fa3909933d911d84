// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Timelock Protocol — Ledger Primitives
//!
//! Everything the timelock vault program leans on but does not own: account
//! addresses, the program-derived address scheme, native balances, token
//! accounting and the clock. The vault program itself lives in the
//! `timelock-contracts` crate and treats every module here as a collaborator
//! reached through a narrow interface.
//!
//! ## Architecture
//!
//! - **address** — 32-byte account addresses and the curve-point test that
//!   separates signing identities from storage-only locations.
//! - **derivation** — program-derived addresses: seeds in, `(address, bump)` out.
//! - **crypto** — SHA-256 helpers and Ed25519 keypairs for signers.
//! - **ledger** — the in-memory balance ledger with atomic `transact` scopes,
//!   allocation reserves and account closing.
//! - **token** — mints, token accounts, associated token addresses, transfers.
//! - **clock** — injected wall time, with a manual clock for tests.
//! - **config** — program ids, account sizes and derivation limits.
//!
//! ## Design Philosophy
//!
//! 1. An operation either commits in full or leaves no trace. The ledger
//!    enforces that, not the callers.
//! 2. All amounts are `u64` in the smallest unit, and every addition or
//!    subtraction is checked.
//! 3. Locations are computed, never registered.

pub mod address;
pub mod clock;
pub mod config;
pub mod crypto;
pub mod derivation;
pub mod ledger;
pub mod token;

pub use address::Address;
pub use clock::{Clock, ManualClock, SystemClock};
pub use derivation::{create_program_address, find_program_address, DerivationError};
pub use ledger::{Account, Authority, Ledger, LedgerError, LedgerState, RentConfig};

// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Timelock Vault Program
//!
//! A depositor locks a fixed amount of the native currency or of one token
//! until an absolute unix timestamp. Only the depositor can take it back,
//! and only once that timestamp has been reached.
//!
//! - **derivation** — where a vault lives: a program-derived address computed
//!   from `(owner, asset, amount, unlock_time)`. No registry, no lookups.
//! - **state** — the `VaultRecord` written at that address, and its fixed
//!   on-ledger layout.
//! - **transfer** — the two asset adapters (`NativeTransfer`,
//!   `TokenTransfer`) behind one `AssetTransfer` capability.
//! - **timelock_vault** — the lifecycle: `Uninitialized → Locked → Withdrawn`.
//! - **events** — what happened, for callers that want to follow along.
//!
//! ## Design Principles
//!
//! 1. Every operation is one atomic ledger scope. A failure anywhere leaves
//!    balances and records exactly as they were.
//! 2. "Unlocked" is never stored. It is `now >= unlock_time`, evaluated
//!    against a single clock reading on each withdrawal.
//! 3. Records are write-once. There is no update path.
//! 4. All balance arithmetic is checked.

pub mod config;
pub mod derivation;
pub mod error;
pub mod events;
pub mod state;
pub mod timelock_vault;
pub mod transfer;

pub use config::VaultConfig;
pub use derivation::{derive_native_vault, derive_token_vault, derive_vault_address};
pub use error::VaultError;
pub use events::VaultEvent;
pub use state::{Asset, VaultRecord, VAULT_RECORD_SPACE};
pub use timelock_vault::{TimelockVault, Withdrawal};
pub use transfer::{AssetTransfer, NativeTransfer, TokenTransfer};

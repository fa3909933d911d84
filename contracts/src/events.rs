//! Vault lifecycle events, recorded after each committed operation.

use serde::{Deserialize, Serialize};
use timelock_protocol::Address;

use crate::state::Asset;

/// Something that happened to a vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VaultEvent {
    /// A vault was created and funded.
    Initialized {
        vault: Address,
        owner: Address,
        amount: u64,
        unlock_time: i64,
        asset: Asset,
    },
    /// A vault was emptied and destroyed.
    Withdrawn {
        vault: Address,
        owner: Address,
        amount: u64,
        asset: Asset,
    },
}

impl VaultEvent {
    /// The vault the event is about.
    pub fn vault(&self) -> &Address {
        match self {
            VaultEvent::Initialized { vault, .. } | VaultEvent::Withdrawn { vault, .. } => vault,
        }
    }
}

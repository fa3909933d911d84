//! # Accounts and Authorities

use serde::{Deserialize, Serialize};

use super::error::LedgerError;
use crate::address::Address;
use crate::config::SYSTEM_PROGRAM_ID;
use crate::derivation::create_program_address;

/// A single ledger account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Native balance in lamports.
    pub lamports: u64,
    /// Fixed-size data buffer, zeroed at allocation.
    pub data: Vec<u8>,
    /// The program allowed to write `data` and debit `lamports`.
    pub owner: Address,
}

impl Account {
    /// A plain wallet: system-owned, no data.
    pub fn wallet(lamports: u64) -> Self {
        Self {
            lamports,
            data: Vec::new(),
            owner: SYSTEM_PROGRAM_ID,
        }
    }

    /// A freshly allocated account of `space` zero bytes.
    pub fn allocated(lamports: u64, space: usize, owner: Address) -> Self {
        Self {
            lamports,
            data: vec![0u8; space],
            owner,
        }
    }

    /// Returns `true` for accounts owned by the system program.
    pub fn is_wallet(&self) -> bool {
        self.owner == SYSTEM_PROGRAM_ID
    }
}

/// Who is authorizing a debit or a close.
///
/// A `Signer` is an identity that proved possession of its key to the
/// submission layer. A `Program` authority is a program acting for one of
/// its derived addresses: the seeds (bump included) must re-derive that
/// address under `program_id`, which only the owning program can arrange.
#[derive(Debug, Clone, Copy)]
pub enum Authority<'a> {
    /// An authenticated key holder.
    Signer(Address),
    /// A program signing for a derived address with its seeds.
    Program {
        /// The program the address was derived under.
        program_id: Address,
        /// Seeds including the trailing bump.
        seeds: &'a [&'a [u8]],
    },
}

impl<'a> Authority<'a> {
    /// The address this authority speaks for.
    pub fn resolve(&self) -> Result<Address, LedgerError> {
        match self {
            Authority::Signer(address) => Ok(*address),
            Authority::Program { program_id, seeds } => {
                Ok(create_program_address(seeds, program_id)?)
            }
        }
    }

    /// The program expected to own an account this authority debits.
    pub fn debiting_program(&self) -> Address {
        match self {
            Authority::Signer(_) => SYSTEM_PROGRAM_ID,
            Authority::Program { program_id, .. } => *program_id,
        }
    }
}

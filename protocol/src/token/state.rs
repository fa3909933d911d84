//! # Token Records

use serde::{Deserialize, Serialize};

use crate::address::Address;

/// A token type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mint {
    /// The only identity allowed to create new supply.
    pub mint_authority: Address,
    /// Total units in circulation.
    pub supply: u64,
    /// Display precision; also asserted by `transfer_checked`.
    pub decimals: u8,
}

impl Mint {
    /// Type tag name used for the record discriminator.
    pub const RECORD_NAME: &'static str = "Mint";
}

/// A balance of one mint controlled by one authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAccount {
    /// The token type held.
    pub mint: Address,
    /// The controlling authority: a wallet, or a program-derived address.
    pub owner: Address,
    /// Units held, in the smallest denomination.
    pub amount: u64,
}

impl TokenAccount {
    /// Type tag name used for the record discriminator.
    pub const RECORD_NAME: &'static str = "TokenAccount";
}

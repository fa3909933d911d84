//! # Account Addresses
//!
//! An [`Address`] is 32 raw bytes. Two kinds of address share the space:
//!
//! - **Signing identities** are Ed25519 public keys, so their bytes decode to
//!   a point on the curve.
//! - **Storage-only locations** (program-derived addresses) are hashes that
//!   deliberately do *not* decode to a curve point, so no private key can
//!   ever sign for them. Only the program that derived them can act on them.
//!
//! [`Address::is_on_curve`] is the single test that tells them apart.

use curve25519_dalek::edwards::CompressedEdwardsY;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from parsing a textual address.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseAddressError {
    #[error("address is not valid base58")]
    InvalidBase58,

    #[error("address must be 32 bytes, got {0}")]
    WrongLength(usize),
}

/// A 32-byte account address.
///
/// Displayed and parsed as base58, the way wallets show it to users.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Address([u8; 32]);

impl Address {
    /// Builds an address from raw bytes. Usable in `const` context so program
    /// ids can be declared as constants.
    pub const fn new_from_array(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Builds an address from a byte slice, checking the length.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self, ParseAddressError> {
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| ParseAddressError::WrongLength(bytes.len()))?;
        Ok(Self(arr))
    }

    /// A fresh address that nobody holds a key for and that is unlikely to
    /// collide with anything else. Handy for mints and scratch accounts.
    pub fn new_unique() -> Self {
        Self(rand::random())
    }

    /// Returns `true` if these bytes decompress to an Ed25519 curve point,
    /// i.e. the address could be a public key with a matching private key.
    pub fn is_on_curve(&self) -> bool {
        CompressedEdwardsY(self.0).decompress().is_some()
    }

    /// Base58 rendering.
    pub fn to_base58(&self) -> String {
        bs58::encode(self.0).into_string()
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Address {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl FromStr for Address {
    type Err = ParseAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|_| ParseAddressError::InvalidBase58)?;
        Self::try_from_slice(&bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base58())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b58 = self.to_base58();
        write!(f, "Address({}...)", &b58[..b58.len().min(8)])
    }
}

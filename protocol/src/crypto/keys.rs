//! # Key Management
//!
//! Ed25519 keypairs for the identities that sign requests against the
//! ledger. Holding a [`Keypair`] is what "authenticated caller" means in this
//! workspace: the vault program reads the signer's address off the keypair,
//! so nobody can act as an owner without the owner's secret key.
//!
//! Key bytes are never logged. The `Debug` impl prints the address only.

use ed25519_dalek::{SigningKey, SECRET_KEY_LENGTH};
use rand::rngs::OsRng;
use std::fmt;
use thiserror::Error;

use crate::address::Address;

/// Errors that can occur during key operations.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("invalid secret key bytes: wrong length or not hex")]
    InvalidSecretKey,
}

/// An Ed25519 signing identity.
///
/// Deliberately not `Serialize`: exporting a secret key should be an
/// explicit call to [`Keypair::secret_key_bytes`], never a side effect of
/// dumping a struct to JSON.
///
/// # Examples
///
/// ```
/// use timelock_protocol::crypto::keys::Keypair;
///
/// let kp = Keypair::generate();
/// assert!(kp.address().is_on_curve());
/// ```
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a fresh keypair using the OS cryptographic RNG.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut OsRng);
        Self { signing_key }
    }

    /// Constructs a keypair deterministically from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Reconstruct a keypair from a hex-encoded secret key.
    ///
    /// Used by the CLI for `--keypair` style flags on local simulations.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_str).map_err(|_| KeyError::InvalidSecretKey)?;
        let arr: [u8; SECRET_KEY_LENGTH] = bytes
            .try_into()
            .map_err(|_| KeyError::InvalidSecretKey)?;
        Ok(Self::from_seed(&arr))
    }

    /// The address this keypair signs for: its Ed25519 public key.
    pub fn address(&self) -> Address {
        Address::new_from_array(self.signing_key.verifying_key().to_bytes())
    }

    /// Exports the raw 32-byte secret key material. Handle with care.
    pub fn secret_key_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }
}

impl Clone for Keypair {
    fn clone(&self) -> Self {
        Self::from_seed(&self.signing_key.to_bytes())
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair(pub={})", self.address())
    }
}

impl PartialEq for Keypair {
    /// Compares public halves only.
    fn eq(&self, other: &Self) -> bool {
        self.address() == other.address()
    }
}

impl Eq for Keypair {}

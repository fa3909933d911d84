//! # Cryptographic Primitives
//!
//! Two things live here: SHA-256 helpers (the hash behind program-derived
//! addresses and record discriminators) and Ed25519 keypairs for the
//! identities that sign requests.
//!
//! Everything is a thin wrapper around `sha2` and `ed25519-dalek`.

pub mod hash;
pub mod keys;

pub use hash::{account_discriminator, sha256_multi};
pub use keys::{KeyError, Keypair};

//! # Hashing Utilities
//!
//! SHA-256 is the only hash the ledger uses. It derives program addresses
//! (see [`crate::derivation`]) and the 8-byte type tags written at the
//! front of every typed account record.

use sha2::{Digest, Sha256};

/// Hash several byte slices as if they were concatenated.
///
/// Program-address derivation feeds seeds, the bump, the program id and a
/// marker through here without building a temporary buffer.
///
/// # Example
///
/// ```
/// use timelock_protocol::crypto::sha256_multi;
///
/// assert_eq!(sha256_multi(&[b"time", b"lock"]), sha256_multi(&[b"timelock"]));
/// ```
pub fn sha256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// The 8-byte type tag for a named account record:
/// `SHA-256("account:<name>")[..8]`.
///
/// Writing the tag ahead of the record body means a location holding some
/// other kind of data is rejected on read instead of being misinterpreted.
pub fn account_discriminator(name: &str) -> [u8; 8] {
    let digest = sha256_multi(&[b"account:", name.as_bytes()]);
    let mut tag = [0u8; 8];
    tag.copy_from_slice(&digest[..8]);
    tag
}

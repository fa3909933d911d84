//! # Program-Derived Addresses
//!
//! A program-derived address is a storage location computed from a list of
//! seeds and the id of the program that will own it:
//!
//! ```text
//! candidate = SHA-256(seed_0 || ... || seed_n || [bump] || program_id || "ProgramDerivedAddress")
//! ```
//!
//! A candidate is only valid if it is *off* the Ed25519 curve, which rules
//! out the existence of a private key for it. [`find_program_address`]
//! scans `bump` from 255 down to 0 and returns the first valid candidate;
//! that bump is canonical. [`create_program_address`] checks a known bump
//! without searching, which is how a stored bump is re-validated later.
//!
//! There is no registry anywhere. Anyone with the seeds can recompute the
//! address, and two derivations from the same seeds always agree.

use thiserror::Error;

use crate::address::Address;
use crate::config::{MAX_SEEDS, MAX_SEED_LEN, PDA_MARKER};
use crate::crypto::hash::sha256_multi;

/// Errors from program-address derivation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DerivationError {
    /// Too many seeds, or a seed longer than [`MAX_SEED_LEN`].
    #[error("invalid seeds: at most {MAX_SEEDS} seeds of at most {MAX_SEED_LEN} bytes each")]
    InvalidSeeds,

    /// The hash landed on the curve, so it could be somebody's public key.
    #[error("derived address lies on the ed25519 curve")]
    OnCurve,

    /// Every bump from 255 down to 0 produced an on-curve address.
    #[error("no viable bump seed found")]
    Exhausted,
}

/// Derives the address for `seeds` (bump included as the last seed) under
/// `program_id`, rejecting on-curve results.
pub fn create_program_address(
    seeds: &[&[u8]],
    program_id: &Address,
) -> Result<Address, DerivationError> {
    if seeds.len() > MAX_SEEDS || seeds.iter().any(|seed| seed.len() > MAX_SEED_LEN) {
        return Err(DerivationError::InvalidSeeds);
    }

    let mut parts: Vec<&[u8]> = Vec::with_capacity(seeds.len() + 2);
    parts.extend_from_slice(seeds);
    parts.push(program_id.as_ref());
    parts.push(PDA_MARKER);

    let address = Address::new_from_array(sha256_multi(&parts));
    if address.is_on_curve() {
        return Err(DerivationError::OnCurve);
    }
    Ok(address)
}

/// Finds the canonical `(address, bump)` for `seeds` under `program_id`.
///
/// The bump is appended as one extra seed byte, so `seeds` may hold at most
/// `MAX_SEEDS - 1` entries.
pub fn find_program_address(
    seeds: &[&[u8]],
    program_id: &Address,
) -> Result<(Address, u8), DerivationError> {
    if seeds.len() >= MAX_SEEDS {
        return Err(DerivationError::InvalidSeeds);
    }

    for bump in (0..=u8::MAX).rev() {
        let bump_seed = [bump];
        let mut with_bump: Vec<&[u8]> = Vec::with_capacity(seeds.len() + 1);
        with_bump.extend_from_slice(seeds);
        with_bump.push(&bump_seed);

        match create_program_address(&with_bump, program_id) {
            Ok(address) => return Ok((address, bump)),
            Err(DerivationError::OnCurve) => continue,
            Err(other) => return Err(other),
        }
    }

    Err(DerivationError::Exhausted)
}

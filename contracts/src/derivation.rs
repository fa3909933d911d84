//! # Vault Addressing
//!
//! A vault lives at the program-derived address of
//!
//! ```text
//! ["vault", owner, (mint), amount.to_le_bytes(), unlock_time.to_le_bytes()]
//! ```
//!
//! under the vault program id. The mint seed is present for token vaults
//! only, so a native vault and a token vault with otherwise equal
//! parameters never collide.

use timelock_protocol::{
    create_program_address, find_program_address, Address, DerivationError,
};

use crate::error::VaultError;
use crate::state::Asset;

/// Domain tag, always the first seed.
pub const VAULT_SEED: &[u8] = b"vault";

/// The owned seed material for one vault.
///
/// Holds the encoded integers so that borrowed seed slices can be handed to
/// the derivation functions and to [`Authority::Program`](timelock_protocol::Authority).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultSeeds {
    owner: Address,
    mint: Option<Address>,
    amount: [u8; 8],
    unlock_time: [u8; 8],
    bump: [u8; 1],
}

impl VaultSeeds {
    /// Seed material for `(owner, asset, amount, unlock_time)`, bump unset.
    pub fn new(owner: &Address, asset: &Asset, amount: u64, unlock_time: i64) -> Self {
        Self {
            owner: *owner,
            mint: asset.mint().copied(),
            amount: amount.to_le_bytes(),
            unlock_time: unlock_time.to_le_bytes(),
            bump: [0],
        }
    }

    /// Attaches a bump for signing or verification.
    pub fn with_bump(mut self, bump: u8) -> Self {
        self.bump = [bump];
        self
    }

    /// The seeds without the bump, in derivation order.
    pub fn seeds(&self) -> Vec<&[u8]> {
        let mut seeds: Vec<&[u8]> = Vec::with_capacity(6);
        seeds.push(VAULT_SEED);
        seeds.push(self.owner.as_ref());
        if let Some(mint) = &self.mint {
            seeds.push(mint.as_ref());
        }
        seeds.push(&self.amount);
        seeds.push(&self.unlock_time);
        seeds
    }

    /// The seeds followed by the bump byte.
    pub fn signer_seeds(&self) -> Vec<&[u8]> {
        let mut seeds = self.seeds();
        seeds.push(&self.bump);
        seeds
    }
}

/// Finds the canonical vault address and bump.
///
/// # Errors
///
/// [`VaultError::DerivationExhausted`] if no bump yields an off-curve
/// address.
pub fn derive_vault_address(
    program_id: &Address,
    owner: &Address,
    asset: &Asset,
    amount: u64,
    unlock_time: i64,
) -> Result<(Address, u8), VaultError> {
    let material = VaultSeeds::new(owner, asset, amount, unlock_time);
    find_program_address(&material.seeds(), program_id).map_err(|err| match err {
        DerivationError::Exhausted => VaultError::DerivationExhausted,
        other => VaultError::Ledger(other.into()),
    })
}

/// Native-currency vault address for `(owner, amount, unlock_time)`.
pub fn derive_native_vault(
    program_id: &Address,
    owner: &Address,
    amount: u64,
    unlock_time: i64,
) -> Result<(Address, u8), VaultError> {
    derive_vault_address(program_id, owner, &Asset::Native, amount, unlock_time)
}

/// Token vault address for `(owner, mint, amount, unlock_time)`.
pub fn derive_token_vault(
    program_id: &Address,
    owner: &Address,
    mint: &Address,
    amount: u64,
    unlock_time: i64,
) -> Result<(Address, u8), VaultError> {
    derive_vault_address(program_id, owner, &Asset::Token(*mint), amount, unlock_time)
}

/// Re-derives with a stored bump and checks the result is `expected`.
///
/// No search: a single hash. Any mismatch, including an on-curve result, is
/// [`VaultError::InvalidDerivation`].
pub fn verify_vault_address(
    program_id: &Address,
    expected: &Address,
    material: &VaultSeeds,
) -> Result<(), VaultError> {
    match create_program_address(&material.signer_seeds(), program_id) {
        Ok(address) if address == *expected => Ok(()),
        _ => Err(VaultError::InvalidDerivation(*expected)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use timelock_protocol::config::TIMELOCK_PROGRAM_ID;

    #[test]
    fn derivation_is_deterministic() {
        let owner = Address::new_unique();
        let a = derive_native_vault(&TIMELOCK_PROGRAM_ID, &owner, 100_000_000, 1_700_000_060)
            .unwrap();
        let b = derive_native_vault(&TIMELOCK_PROGRAM_ID, &owner, 100_000_000, 1_700_000_060)
            .unwrap();
        assert_eq!(a, b);
        assert!(!a.0.is_on_curve());
    }

    #[test]
    fn every_parameter_moves_the_address() {
        let owner = Address::new_unique();
        let mint = Address::new_unique();
        let base = derive_native_vault(&TIMELOCK_PROGRAM_ID, &owner, 10, 1_000).unwrap().0;

        let others = [
            derive_native_vault(&TIMELOCK_PROGRAM_ID, &Address::new_unique(), 10, 1_000),
            derive_native_vault(&TIMELOCK_PROGRAM_ID, &owner, 11, 1_000),
            derive_native_vault(&TIMELOCK_PROGRAM_ID, &owner, 10, 1_001),
            derive_token_vault(&TIMELOCK_PROGRAM_ID, &owner, &mint, 10, 1_000),
            derive_native_vault(&Address::new_unique(), &owner, 10, 1_000),
        ];
        for other in others {
            assert_ne!(other.unwrap().0, base);
        }
    }

    #[test]
    fn seeds_are_little_endian_and_ordered() {
        let owner = Address::new_unique();
        let mint = Address::new_unique();
        let material = VaultSeeds::new(&owner, &Asset::Token(mint), 0x0102, -1);
        let seeds = material.seeds();
        assert_eq!(seeds.len(), 5);
        assert_eq!(seeds[0], b"vault");
        assert_eq!(seeds[1], owner.as_ref());
        assert_eq!(seeds[2], mint.as_ref());
        assert_eq!(seeds[3], &[0x02, 0x01, 0, 0, 0, 0, 0, 0]);
        assert_eq!(seeds[4], &[0xff; 8]);

        let native = VaultSeeds::new(&owner, &Asset::Native, 1, 1);
        assert_eq!(native.seeds().len(), 4);
        assert_eq!(native.with_bump(7).signer_seeds().last(), Some(&&[7u8][..]));
    }

    #[test]
    fn stored_bump_verifies() {
        let owner = Address::new_unique();
        let (vault, bump) =
            derive_native_vault(&TIMELOCK_PROGRAM_ID, &owner, 5, 99).unwrap();
        let material = VaultSeeds::new(&owner, &Asset::Native, 5, 99).with_bump(bump);
        verify_vault_address(&TIMELOCK_PROGRAM_ID, &vault, &material).unwrap();

        let wrong_asset =
            VaultSeeds::new(&owner, &Asset::Token(Address::new_unique()), 5, 99).with_bump(bump);
        assert_eq!(
            verify_vault_address(&TIMELOCK_PROGRAM_ID, &vault, &wrong_asset),
            Err(VaultError::InvalidDerivation(vault))
        );
    }
}

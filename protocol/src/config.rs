//! # Protocol Configuration & Constants
//!
//! Every magic number the ledger and the vault program agree on lives here.
//! Program ids are fixed 32-byte values; account sizes are the byte lengths
//! the ledger allocates for each record kind.

use crate::address::Address;

// ---------------------------------------------------------------------------
// Program Identifiers
// ---------------------------------------------------------------------------

/// The system program owns every plain wallet. All zeroes, by convention.
pub const SYSTEM_PROGRAM_ID: Address = Address::new_from_array([0u8; 32]);

/// The token program owns mints and token accounts.
/// Base58: `TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA`.
pub const TOKEN_PROGRAM_ID: Address = Address::new_from_array([
    6, 221, 246, 225, 215, 101, 161, 147, 217, 203, 225, 70, 206, 235, 121, 172, 28, 180, 133,
    237, 95, 91, 55, 145, 58, 140, 245, 133, 126, 255, 0, 169,
]);

/// The associated token account program. Only its id matters here: it is the
/// program id under which associated token addresses are derived.
/// Base58: `ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL`.
pub const ASSOCIATED_TOKEN_PROGRAM_ID: Address = Address::new_from_array([
    140, 151, 37, 143, 78, 36, 137, 241, 187, 61, 16, 41, 20, 142, 13, 131, 11, 90, 19, 153, 218,
    255, 16, 132, 4, 142, 123, 216, 219, 233, 248, 89,
]);

/// The timelock vault program.
/// Base58: `61DbVFQopKRi1kyCHBNdYeHHs5xE633Sen2JLFP91reU`.
pub const TIMELOCK_PROGRAM_ID: Address = Address::new_from_array([
    74, 88, 172, 230, 194, 94, 106, 149, 213, 73, 142, 205, 148, 119, 199, 67, 33, 248, 62, 237,
    181, 194, 74, 133, 223, 11, 64, 66, 18, 118, 230, 161,
]);

// ---------------------------------------------------------------------------
// Derivation Limits
// ---------------------------------------------------------------------------

/// Maximum number of seeds (bump included) accepted by program-address derivation.
pub const MAX_SEEDS: usize = 16;

/// Maximum length of a single seed in bytes.
pub const MAX_SEED_LEN: usize = 32;

/// Suffix mixed into every program-derived address hash so that derived
/// addresses can never collide with hashes computed for other purposes.
pub const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

// ---------------------------------------------------------------------------
// Account Sizes
// ---------------------------------------------------------------------------

/// Bytes charged for every account on top of its data, for reserve purposes.
pub const ACCOUNT_STORAGE_OVERHEAD: u64 = 128;

/// Size of a mint record.
pub const MINT_SPACE: usize = 82;

/// Size of a token account record.
pub const TOKEN_ACCOUNT_SPACE: usize = 165;

// ---------------------------------------------------------------------------
// Allocation Reserve
// ---------------------------------------------------------------------------

/// Lamports charged per byte per year of storage.
pub const DEFAULT_LAMPORTS_PER_BYTE_YEAR: u64 = 3_480;

/// Years of storage an account must prepay to stay allocated.
pub const DEFAULT_EXEMPTION_YEARS: u64 = 2;

/// One whole unit of the native currency, in lamports.
pub const LAMPORTS_PER_UNIT: u64 = 1_000_000_000;

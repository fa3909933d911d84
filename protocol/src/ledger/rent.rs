//! # Allocation Reserve
//!
//! An account stays allocated only while it holds a minimum balance
//! proportional to its size. The payer of an allocation funds that reserve
//! up front; closing the account releases it to whoever the closer names.

use serde::{Deserialize, Serialize};

use crate::config::{
    ACCOUNT_STORAGE_OVERHEAD, DEFAULT_EXEMPTION_YEARS, DEFAULT_LAMPORTS_PER_BYTE_YEAR,
};

/// Reserve parameters, deserializable so a deployment can override them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RentConfig {
    /// Lamports per byte per year.
    pub lamports_per_byte_year: u64,
    /// Years of storage an allocation must prepay.
    pub exemption_years: u64,
}

impl Default for RentConfig {
    fn default() -> Self {
        Self {
            lamports_per_byte_year: DEFAULT_LAMPORTS_PER_BYTE_YEAR,
            exemption_years: DEFAULT_EXEMPTION_YEARS,
        }
    }
}

impl RentConfig {
    /// Minimum balance for an account with `data_len` bytes of data.
    ///
    /// `(128 + data_len) * lamports_per_byte_year * exemption_years`,
    /// saturating rather than wrapping on absurd inputs.
    pub fn minimum_balance(&self, data_len: usize) -> u64 {
        (ACCOUNT_STORAGE_OVERHEAD.saturating_add(data_len as u64))
            .saturating_mul(self.lamports_per_byte_year)
            .saturating_mul(self.exemption_years)
    }
}

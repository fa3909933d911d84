//! # Vault Configuration

use serde::{Deserialize, Serialize};

/// Runtime knobs for the vault program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    /// Accept locks whose unlock time is not in the future at creation.
    ///
    /// Off by default: such a lock would be withdrawable immediately, which
    /// is almost always a client bug (seconds vs. milliseconds, wrong sign).
    pub allow_past_unlock: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn past_unlock_rejected_by_default() {
        assert!(!VaultConfig::default().allow_past_unlock);
        let parsed: VaultConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, VaultConfig::default());
    }
}

//! # Typed Records
//!
//! Typed account data is laid out as an 8-byte tag followed by the
//! `bincode` encoding of the record. The tag is
//! [`account_discriminator`](crate::crypto::hash::account_discriminator)
//! of the record's type name. Any bytes after the encoding stay zero.

use serde::{de::DeserializeOwned, Serialize};

use super::error::LedgerError;
use crate::address::Address;

const TAG_LEN: usize = 8;

/// Writes `value` behind `tag` into `data`, which must be large enough.
pub fn write_record<T: Serialize>(
    account: &Address,
    data: &mut [u8],
    tag: [u8; 8],
    value: &T,
) -> Result<(), LedgerError> {
    let body = bincode::serialize(value).map_err(|e| LedgerError::InvalidAccountData {
        account: *account,
        reason: e.to_string(),
    })?;
    let needed = TAG_LEN + body.len();
    if data.len() < needed {
        return Err(LedgerError::InvalidAccountData {
            account: *account,
            reason: format!("record needs {needed} bytes, account has {}", data.len()),
        });
    }
    data[..TAG_LEN].copy_from_slice(&tag);
    data[TAG_LEN..needed].copy_from_slice(&body);
    Ok(())
}

/// Reads a record written by [`write_record`], checking the tag first.
pub fn read_record<T: DeserializeOwned>(
    account: &Address,
    data: &[u8],
    tag: [u8; 8],
) -> Result<T, LedgerError> {
    if data.len() < TAG_LEN || data[..TAG_LEN] != tag {
        return Err(LedgerError::InvalidAccountData {
            account: *account,
            reason: "missing or foreign type tag".into(),
        });
    }
    bincode::deserialize(&data[TAG_LEN..]).map_err(|e| LedgerError::InvalidAccountData {
        account: *account,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::hash::account_discriminator;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        a: u64,
        b: Option<u8>,
    }

    #[test]
    fn tagged_record_reads_back() {
        let addr = Address::new_unique();
        let tag = account_discriminator("Sample");
        let mut data = vec![0u8; 32];
        let value = Sample { a: 42, b: Some(7) };
        write_record(&addr, &mut data, tag, &value).unwrap();
        assert_eq!(read_record::<Sample>(&addr, &data, tag).unwrap(), value);
    }

    #[test]
    fn foreign_tag_rejected() {
        let addr = Address::new_unique();
        let mut data = vec![0u8; 32];
        write_record(&addr, &mut data, account_discriminator("Sample"), &Sample { a: 1, b: None })
            .unwrap();
        let err = read_record::<Sample>(&addr, &data, account_discriminator("Other")).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAccountData { .. }));
    }

    #[test]
    fn undersized_buffer_rejected() {
        let addr = Address::new_unique();
        let mut data = vec![0u8; 10];
        let err = write_record(&addr, &mut data, [0u8; 8], &Sample { a: 1, b: None }).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAccountData { .. }));
    }
}

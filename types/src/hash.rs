//! Transaction identifiers returned by the ledger registrar.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::TypesError;

/// An opaque transaction identifier, e.g. `0xabc`.
///
/// The format is registrar specific; the only requirement is that it is
/// non-empty and free of whitespace.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(String);

impl TxHash {
    pub fn new(raw: impl Into<String>) -> Result<Self, TypesError> {
        let raw = raw.into();
        if raw.is_empty() || raw.chars().any(char::is_whitespace) {
            return Err(TypesError::InvalidTxHash(raw));
        }
        Ok(Self(raw))
    }

    /// Build a `0x`-prefixed hash from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(format!("0x{}", hex::encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes_is_prefixed_hex() {
        assert_eq!(TxHash::from_bytes(&[0xab, 0x01]).as_str(), "0xab01");
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        assert!(TxHash::new("").is_err());
        assert!(TxHash::new("0x ab").is_err());
        assert!(TxHash::new("0xabc").is_ok());
    }
}

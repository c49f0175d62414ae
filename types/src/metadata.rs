//! Payloads exchanged with the ledger registrar and the record store.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::{ContentAddress, Timestamp, TxHash, UploadCandidate};

/// Open key/value metadata attached to a ledger registration.
///
/// Always carries `fileName`, `fileType` and `fileSize` when built from a
/// candidate; callers may add further entries.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentMetadata(BTreeMap<String, Value>);

impl ContentMetadata {
    pub const FILE_NAME: &'static str = "fileName";
    pub const FILE_TYPE: &'static str = "fileType";
    pub const FILE_SIZE: &'static str = "fileSize";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_candidate(candidate: &UploadCandidate) -> Self {
        let mut meta = Self::new();
        meta.insert(Self::FILE_NAME, candidate.name());
        meta.insert(Self::FILE_TYPE, candidate.media_type());
        meta.insert(Self::FILE_SIZE, candidate.size());
        meta
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn file_name(&self) -> Option<&str> {
        self.get(Self::FILE_NAME).and_then(Value::as_str)
    }

    pub fn file_size(&self) -> Option<u64> {
        self.get(Self::FILE_SIZE).and_then(Value::as_u64)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// What the ledger registrar hands back once a registration is confirmed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationReceipt {
    pub transaction_hash: TxHash,
    pub timestamp: Timestamp,
}

/// A row in the hosted verification table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    pub file_name: String,
    pub file_type: String,
    pub file_size: u64,
    pub ipfs_url: ContentAddress,
    pub transaction_hash: TxHash,
    /// ISO-8601 confirmation time reported by the registrar.
    pub verification_date: Timestamp,
}

impl VerificationRecord {
    pub fn new(
        candidate: &UploadCandidate,
        address: &ContentAddress,
        receipt: &RegistrationReceipt,
    ) -> Self {
        Self {
            file_name: candidate.name().to_string(),
            file_type: candidate.media_type().to_string(),
            file_size: candidate.size(),
            ipfs_url: address.clone(),
            transaction_hash: receipt.transaction_hash.clone(),
            verification_date: receipt.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate() -> UploadCandidate {
        UploadCandidate::new("art.png", "image/png", vec![0u8; 1024])
    }

    #[test]
    fn metadata_from_candidate_has_required_keys() {
        let meta = ContentMetadata::from_candidate(&candidate());
        assert_eq!(meta.file_name(), Some("art.png"));
        assert_eq!(meta.get(ContentMetadata::FILE_TYPE), Some(&Value::from("image/png")));
        assert_eq!(meta.file_size(), Some(1024));
        assert_eq!(meta.len(), 3);
    }

    #[test]
    fn record_serialises_column_names() {
        let receipt = RegistrationReceipt {
            transaction_hash: TxHash::new("0xabc").unwrap(),
            timestamp: Timestamp::parse("2024-01-01T00:00:00Z").unwrap(),
        };
        let address = ContentAddress::new("https://cid123.example/art.png").unwrap();
        let record = VerificationRecord::new(&candidate(), &address, &receipt);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["file_name"], "art.png");
        assert_eq!(json["file_type"], "image/png");
        assert_eq!(json["file_size"], 1024);
        assert_eq!(json["ipfs_url"], "https://cid123.example/art.png");
        assert_eq!(json["transaction_hash"], "0xabc");
        assert!(json["verification_date"]
            .as_str()
            .unwrap()
            .starts_with("2024-01-01T00:00:00"));
    }
}

//! Offline stand-ins for the hosted services.
//!
//! `LocalContentStore` derives a content identifier from the payload's
//! Blake2b digest and optionally keeps the bytes on disk.
//! `JsonlRecordStore` appends each verification row to a JSON-lines file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;
use veriseal_store::{CollaboratorError, ContentStore, RecordStore};
use veriseal_types::{ContentAddress, UploadCandidate, VerificationRecord};

use crate::DEFAULT_GATEWAY_HOST;

type Blake2b256 = Blake2b<U32>;

/// Prefix marking identifiers that were never pinned on a real network.
const LOCAL_CID_PREFIX: &str = "local";

/// Hash `(name, payload)` into a hex content identifier.
pub fn content_id(candidate: &UploadCandidate) -> String {
    let mut hasher = Blake2b256::new();
    hasher.update(candidate.name().as_bytes());
    hasher.update([0u8]);
    hasher.update(candidate.payload());
    format!("{LOCAL_CID_PREFIX}{}", hex::encode(hasher.finalize()))
}

pub struct LocalContentStore {
    gateway_host: String,
    directory: Option<PathBuf>,
}

impl LocalContentStore {
    pub fn new() -> Self {
        Self {
            gateway_host: DEFAULT_GATEWAY_HOST.to_string(),
            directory: None,
        }
    }

    pub fn with_gateway_host(mut self, host: impl Into<String>) -> Self {
        self.gateway_host = host.into();
        self
    }

    /// Keep a copy of every stored payload under `directory`, named by its
    /// content identifier.
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }
}

impl Default for LocalContentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentStore for LocalContentStore {
    async fn store(&self, candidate: &UploadCandidate) -> Result<ContentAddress, CollaboratorError> {
        let cid = content_id(candidate);
        if let Some(dir) = &self.directory {
            tokio::fs::create_dir_all(dir).await.map_err(io_error)?;
            tokio::fs::write(dir.join(&cid), candidate.payload())
                .await
                .map_err(io_error)?;
        }
        debug!(%cid, bytes = candidate.size(), "content stored locally");
        ContentAddress::ipfs_gateway(&cid, &self.gateway_host, candidate.name())
            .map_err(|e| CollaboratorError::Other(e.to_string()))
    }
}

/// Appends verification rows to a file, one JSON object per line.
pub struct JsonlRecordStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonlRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecordStore for JsonlRecordStore {
    async fn insert(&self, record: &VerificationRecord) -> Result<(), CollaboratorError> {
        let mut line = serde_json::to_vec(record).map_err(|e| CollaboratorError::Other(e.to_string()))?;
        line.push(b'\n');

        let _guard = self.lock.lock().await;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
        }
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(io_error)?;
        file.write_all(&line).await.map_err(io_error)?;
        file.flush().await.map_err(io_error)?;
        debug!(path = %self.path.display(), "record appended");
        Ok(())
    }
}

fn io_error(e: std::io::Error) -> CollaboratorError {
    CollaboratorError::Unavailable(e.to_string())
}

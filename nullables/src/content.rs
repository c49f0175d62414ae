//! Nullable content store.

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;
use veriseal_store::{CollaboratorError, ContentStore};
use veriseal_types::{ContentAddress, UploadCandidate};

use crate::{CallLog, NullFailure};

/// A content store that returns a scripted address.
pub struct NullContentStore {
    address: ContentAddress,
    failure: Mutex<Option<NullFailure>>,
    delay: Duration,
    stored: Mutex<Vec<UploadCandidate>>,
    log: CallLog,
}

impl NullContentStore {
    pub const CALL: &'static str = "content_store.store";

    /// Always answer with `address`.
    ///
    /// # Panics
    /// Panics if `address` is not an http(s) URL.
    pub fn returning(address: &str) -> Self {
        Self {
            address: ContentAddress::new(address).expect("valid test content address"),
            failure: Mutex::new(None),
            delay: Duration::ZERO,
            stored: Mutex::new(Vec::new()),
            log: CallLog::new(),
        }
    }

    /// Always fail with `failure`.
    pub fn failing(failure: NullFailure) -> Self {
        let store = Self::returning("https://unused.example/");
        *store.failure.lock().unwrap() = Some(failure);
        store
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_log(mut self, log: CallLog) -> Self {
        self.log = log;
        self
    }

    pub fn set_failure(&self, failure: Option<NullFailure>) {
        *self.failure.lock().unwrap() = failure;
    }

    /// Candidates received so far.
    pub fn stored(&self) -> Vec<UploadCandidate> {
        self.stored.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.stored.lock().unwrap().len()
    }
}

#[async_trait]
impl ContentStore for NullContentStore {
    async fn store(&self, candidate: &UploadCandidate) -> Result<ContentAddress, CollaboratorError> {
        self.log.record(Self::CALL);
        self.stored.lock().unwrap().push(candidate.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let failure = *self.failure.lock().unwrap();
        match failure {
            Some(f) => Err(f.to_error("content store")),
            None => Ok(self.address.clone()),
        }
    }
}

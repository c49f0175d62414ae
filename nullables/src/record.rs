//! Nullable record store: in-memory rows for testing.

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;
use veriseal_store::{CollaboratorError, RecordStore};
use veriseal_types::VerificationRecord;

use crate::{CallLog, NullFailure};

pub struct NullRecordStore {
    records: Mutex<Vec<VerificationRecord>>,
    attempts: Mutex<usize>,
    failure: Mutex<Option<NullFailure>>,
    delay: Duration,
    log: CallLog,
}

impl NullRecordStore {
    pub const CALL: &'static str = "record_store.insert";

    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            attempts: Mutex::new(0),
            failure: Mutex::new(None),
            delay: Duration::ZERO,
            log: CallLog::new(),
        }
    }

    pub fn failing(failure: NullFailure) -> Self {
        let store = Self::new();
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

    /// Successfully inserted rows.
    pub fn records(&self) -> Vec<VerificationRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Insert attempts, including failed ones.
    pub fn call_count(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

impl Default for NullRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for NullRecordStore {
    async fn insert(&self, record: &VerificationRecord) -> Result<(), CollaboratorError> {
        self.log.record(Self::CALL);
        *self.attempts.lock().unwrap() += 1;
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let failure = *self.failure.lock().unwrap();
        if let Some(f) = failure {
            return Err(f.to_error("record store"));
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

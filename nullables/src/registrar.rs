//! Nullable ledger registrar.

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;
use veriseal_store::{CollaboratorError, LedgerRegistrar};
use veriseal_types::{ContentAddress, ContentMetadata, RegistrationReceipt, Timestamp, TxHash};

use crate::{CallLog, NullFailure};

/// A registrar that returns a scripted receipt.
pub struct NullRegistrar {
    receipt: RegistrationReceipt,
    failure: Mutex<Option<NullFailure>>,
    delay: Duration,
    requests: Mutex<Vec<(ContentAddress, ContentMetadata)>>,
    log: CallLog,
}

impl NullRegistrar {
    pub const CALL: &'static str = "registrar.register";

    /// Always confirm with `tx` at `timestamp` (RFC 3339).
    ///
    /// # Panics
    /// Panics if either argument is malformed.
    pub fn returning(tx: &str, timestamp: &str) -> Self {
        Self {
            receipt: RegistrationReceipt {
                transaction_hash: TxHash::new(tx).expect("valid test tx hash"),
                timestamp: Timestamp::parse(timestamp).expect("valid test timestamp"),
            },
            failure: Mutex::new(None),
            delay: Duration::ZERO,
            requests: Mutex::new(Vec::new()),
            log: CallLog::new(),
        }
    }

    pub fn failing(failure: NullFailure) -> Self {
        let registrar = Self::returning("0x0", "1970-01-01T00:00:00Z");
        *registrar.failure.lock().unwrap() = Some(failure);
        registrar
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

    /// Every `(address, metadata)` pair received so far.
    pub fn requests(&self) -> Vec<(ContentAddress, ContentMetadata)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LedgerRegistrar for NullRegistrar {
    async fn register(
        &self,
        address: &ContentAddress,
        metadata: &ContentMetadata,
    ) -> Result<RegistrationReceipt, CollaboratorError> {
        self.log.record(Self::CALL);
        self.requests
            .lock()
            .unwrap()
            .push((address.clone(), metadata.clone()));
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let failure = *self.failure.lock().unwrap();
        match failure {
            Some(f) => Err(f.to_error("registrar")),
            None => Ok(self.receipt.clone()),
        }
    }
}

//! Verification record persistence trait.

use async_trait::async_trait;
use veriseal_types::VerificationRecord;

use crate::CollaboratorError;

/// Persists verification records in a hosted database.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert(&self, record: &VerificationRecord) -> Result<(), CollaboratorError>;
}

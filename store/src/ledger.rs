//! Ledger registration trait.

use async_trait::async_trait;
use veriseal_types::{ContentAddress, ContentMetadata, RegistrationReceipt};

use crate::CollaboratorError;

/// Records a content address on a blockchain.
///
/// A real implementation signs, submits and polls for confirmation; callers
/// only see the single awaited outcome.
#[async_trait]
pub trait LedgerRegistrar: Send + Sync {
    async fn register(
        &self,
        address: &ContentAddress,
        metadata: &ContentMetadata,
    ) -> Result<RegistrationReceipt, CollaboratorError>;
}

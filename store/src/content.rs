//! Content-addressed storage trait.

use async_trait::async_trait;
use veriseal_types::{ContentAddress, UploadCandidate};

use crate::CollaboratorError;

/// Pins a file on a content-addressed network.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Store the candidate's bytes under its name and media type, returning a
    /// publicly resolvable address.
    async fn store(&self, candidate: &UploadCandidate) -> Result<ContentAddress, CollaboratorError>;
}

//! Fundamental types for Veriseal.
//!
//! This crate defines the data model shared across every other crate in the
//! workspace: upload candidates, content addresses, transaction hashes,
//! timestamps, wallet identities, records, results and workflow state.

pub mod address;
pub mod candidate;
pub mod content;
pub mod error;
pub mod hash;
pub mod metadata;
pub mod result;
pub mod session;
pub mod state;
pub mod time;

pub use address::{CreatorIdentity, WalletAddress};
pub use candidate::UploadCandidate;
pub use content::ContentAddress;
pub use error::TypesError;
pub use hash::TxHash;
pub use metadata::{ContentMetadata, RegistrationReceipt, VerificationRecord};
pub use result::VerificationResult;
pub use session::Session;
pub use state::{FailureCause, WorkflowState};
pub use time::Timestamp;

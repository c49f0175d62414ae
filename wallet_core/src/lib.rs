//! Concrete collaborators for Veriseal.
//!
//! Provides everything the composition root needs to wire a real workflow:
//! - Web3.Storage pinning behind [`ContentStore`](veriseal_store::ContentStore)
//! - Supabase record persistence and OAuth sessions behind
//!   [`RecordStore`](veriseal_store::RecordStore) and
//!   [`IdentityProvider`](veriseal_store::IdentityProvider)
//! - The connected wallet behind [`WalletCapability`](veriseal_store::WalletCapability)
//! - Offline stand-ins (local content hashing, JSON-lines records) for runs
//!   without network access

mod http;

pub mod error;
pub mod local;
pub mod supabase;
pub mod wallet;
pub mod web3storage;

pub use error::ClientError;
pub use local::{JsonlRecordStore, LocalContentStore};
pub use supabase::{SupabaseClient, DEFAULT_TABLE};
pub use wallet::ConnectedWallet;
pub use web3storage::{Web3StorageClient, DEFAULT_GATEWAY_HOST, DEFAULT_UPLOAD_ENDPOINT};

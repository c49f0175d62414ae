//! Nullable infrastructure for deterministic testing.
//!
//! Every collaborator the verification workflow talks to (clock, wallet,
//! content store, ledger registrar, record store, identity provider) has a
//! nullable twin here. They:
//! - Return scripted values, or fail on demand
//! - Record every call so tests can assert on ordering and short-circuits
//! - Can simulate latency with `tokio::time` (works with paused time)
//! - Never touch the filesystem or network
//!
//! Usage: inject nullables in place of the real collaborators.

pub mod call_log;
pub mod clock;
pub mod content;
pub mod failure;
pub mod identity;
pub mod record;
pub mod registrar;
pub mod wallet;

pub use call_log::CallLog;
pub use clock::NullClock;
pub use content::NullContentStore;
pub use failure::NullFailure;
pub use identity::NullIdentity;
pub use record::NullRecordStore;
pub use registrar::NullRegistrar;
pub use wallet::NullWallet;

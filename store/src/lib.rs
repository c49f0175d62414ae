//! Abstract collaborator traits for Veriseal.
//!
//! Every external capability the verification workflow depends on (content
//! pinning, ledger registration, record persistence, identity, wallet,
//! clock) is a trait here. Real backends live in `veriseal-wallet-core` and
//! `veriseal-ledger`; deterministic fakes live in `veriseal-nullables`. The
//! workflow depends only on the traits.

pub mod clock;
pub mod content;
pub mod error;
pub mod identity;
pub mod ledger;
pub mod record;
pub mod wallet;

pub use clock::{Clock, SystemClock};
pub use content::ContentStore;
pub use error::CollaboratorError;
pub use identity::IdentityProvider;
pub use ledger::LedgerRegistrar;
pub use record::RecordStore;
pub use wallet::WalletCapability;

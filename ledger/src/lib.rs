//! Ledger registration for Veriseal.
//!
//! No smart contract exists behind these registrars. [`SimulatedRegistrar`]
//! stands in for "sign, submit, wait for confirmation" with a wallet check,
//! a fixed confirmation delay and a random transaction hash.

pub mod explorer;
pub mod simulated;

pub use explorer::{explorer_tx_url, DEFAULT_EXPLORER_URL};
pub use simulated::{SimulatedRegistrar, DEFAULT_CONFIRMATION_DELAY};

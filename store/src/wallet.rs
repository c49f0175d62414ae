//! Read-only wallet capability.

use veriseal_types::WalletAddress;

/// Exposes the address of the currently connected wallet, if any.
///
/// There is no connect flow here; connecting is owned by whatever manages
/// the wallet (a browser extension, a CLI flag).
pub trait WalletCapability: Send + Sync {
    fn connected_address(&self) -> Option<WalletAddress>;
}

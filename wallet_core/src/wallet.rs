//! Connected wallet capability.

use std::sync::RwLock;

use tracing::info;
use veriseal_store::WalletCapability;
use veriseal_types::WalletAddress;

/// Holds the address of whichever wallet the user connected, if any.
///
/// The workflow only reads it; connecting and disconnecting belong to the
/// surface that manages the wallet.
#[derive(Default)]
pub struct ConnectedWallet {
    address: RwLock<Option<WalletAddress>>,
}

impl ConnectedWallet {
    pub fn new(address: Option<WalletAddress>) -> Self {
        Self {
            address: RwLock::new(address),
        }
    }

    pub fn connect(&self, address: WalletAddress) {
        info!(%address, "wallet connected");
        *self.write() = Some(address);
    }

    pub fn disconnect(&self) {
        if self.write().take().is_some() {
            info!("wallet disconnected");
        }
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Option<WalletAddress>> {
        self.address.write().unwrap_or_else(|p| p.into_inner())
    }
}

impl WalletCapability for ConnectedWallet {
    fn connected_address(&self) -> Option<WalletAddress> {
        self.address
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }
}

//! Nullable wallet: a settable connected address.

use std::sync::RwLock;
use veriseal_store::WalletCapability;
use veriseal_types::WalletAddress;

pub struct NullWallet {
    address: RwLock<Option<WalletAddress>>,
}

impl NullWallet {
    /// A wallet connected at `address`.
    ///
    /// # Panics
    /// Panics if `address` is not a valid wallet address.
    pub fn connected(address: &str) -> Self {
        let address = WalletAddress::parse(address).expect("valid test wallet address");
        Self {
            address: RwLock::new(Some(address)),
        }
    }

    pub fn disconnected() -> Self {
        Self {
            address: RwLock::new(None),
        }
    }

    pub fn connect(&self, address: WalletAddress) {
        *self.address.write().unwrap() = Some(address);
    }

    pub fn disconnect(&self) {
        *self.address.write().unwrap() = None;
    }
}

impl WalletCapability for NullWallet {
    fn connected_address(&self) -> Option<WalletAddress> {
        self.address.read().unwrap().clone()
    }
}

//! Simulated ledger registrar.

use async_trait::async_trait;
use rand::RngCore;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use veriseal_store::{Clock, CollaboratorError, LedgerRegistrar, WalletCapability};
use veriseal_types::{ContentAddress, ContentMetadata, RegistrationReceipt, TxHash};

/// How long a simulated registration takes to "confirm".
pub const DEFAULT_CONFIRMATION_DELAY: Duration = Duration::from_secs(2);

/// Number of random bytes in a simulated transaction hash.
const TX_HASH_BYTES: usize = 32;

/// A registrar that pretends to submit a transaction.
///
/// Requires a connected wallet, as a real signer would.
pub struct SimulatedRegistrar {
    wallet: Arc<dyn WalletCapability>,
    clock: Arc<dyn Clock>,
    confirmation_delay: Duration,
}

impl SimulatedRegistrar {
    pub fn new(wallet: Arc<dyn WalletCapability>, clock: Arc<dyn Clock>) -> Self {
        Self {
            wallet,
            clock,
            confirmation_delay: DEFAULT_CONFIRMATION_DELAY,
        }
    }

    pub fn with_confirmation_delay(mut self, delay: Duration) -> Self {
        self.confirmation_delay = delay;
        self
    }

    pub fn confirmation_delay(&self) -> Duration {
        self.confirmation_delay
    }

    fn random_tx_hash() -> TxHash {
        let mut bytes = [0u8; TX_HASH_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        TxHash::from_bytes(&bytes)
    }
}

#[async_trait]
impl LedgerRegistrar for SimulatedRegistrar {
    async fn register(
        &self,
        address: &ContentAddress,
        metadata: &ContentMetadata,
    ) -> Result<RegistrationReceipt, CollaboratorError> {
        let signer = self
            .wallet
            .connected_address()
            .ok_or_else(|| CollaboratorError::Rejected("wallet is not connected".into()))?;

        info!(%address, %signer, entries = metadata.len(), "registering content");
        debug!(?metadata, "registration metadata");

        tokio::time::sleep(self.confirmation_delay).await;

        let receipt = RegistrationReceipt {
            transaction_hash: Self::random_tx_hash(),
            timestamp: self.clock.now(),
        };
        info!(tx = %receipt.transaction_hash, "registration confirmed");
        Ok(receipt)
    }
}

//! The result panel produced by a successful verification run.

use serde::{Deserialize, Serialize};

use crate::{ContentAddress, CreatorIdentity, RegistrationReceipt, Timestamp, TxHash};

/// Confidence reported for every verified file. No detector exists behind it.
pub const PLACEHOLDER_CONFIDENCE: f64 = 96.8;

/// Model label reported for every verified file.
pub const PLACEHOLDER_MODEL: &str = "Stable Diffusion XL";

/// NFT status reported for every verified file.
pub const PLACEHOLDER_NFT_STATUS: &str = "Ready to Mint";

/// Outcome of a successful verification run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    /// Confidence score in the range 0..=100.
    pub confidence: f64,
    pub model: String,
    pub creator: CreatorIdentity,
    pub creation_date: Timestamp,
    pub registered: bool,
    pub nft_status: String,
    pub ipfs_url: ContentAddress,
    pub transaction_hash: TxHash,
    /// Name of the file this result describes.
    pub file_name: String,
}

impl VerificationResult {
    /// Build a result with the placeholder detector fields filled in.
    pub fn synthesize(
        file_name: impl Into<String>,
        ipfs_url: ContentAddress,
        receipt: &RegistrationReceipt,
        creator: CreatorIdentity,
        creation_date: Timestamp,
    ) -> Self {
        Self {
            confidence: PLACEHOLDER_CONFIDENCE,
            model: PLACEHOLDER_MODEL.to_string(),
            creator,
            creation_date,
            registered: true,
            nft_status: PLACEHOLDER_NFT_STATUS.to_string(),
            ipfs_url,
            transaction_hash: receipt.transaction_hash.clone(),
            file_name: file_name.into(),
        }
    }
}

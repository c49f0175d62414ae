//! Block-explorer links for registered transactions.

use veriseal_types::TxHash;

/// Base URL used when none is configured.
pub const DEFAULT_EXPLORER_URL: &str = "https://etherscan.io";

/// Link to a transaction on a block explorer: `{base}/tx/{hash}`.
pub fn explorer_tx_url(base: &str, tx: &TxHash) -> String {
    format!("{}/tx/{}", base.trim_end_matches('/'), tx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_tx_link() {
        let tx = TxHash::new("0xabc").unwrap();
        assert_eq!(explorer_tx_url(DEFAULT_EXPLORER_URL, &tx), "https://etherscan.io/tx/0xabc");
        assert_eq!(
            explorer_tx_url("https://sepolia.etherscan.io/", &tx),
            "https://sepolia.etherscan.io/tx/0xabc"
        );
    }
}

//! Terminal output for verification results.

use std::fmt::Write;
use std::path::Path;

use veriseal_ledger::explorer_tx_url;
use veriseal_types::{FailureCause, VerificationResult, WorkflowState};

const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// Guess a media type from the file extension.
pub fn guess_media_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("txt") => "text/plain",
        Some("md") => "text/markdown",
        Some("json") => "application/json",
        Some("pdf") => "application/pdf",
        _ => FALLBACK_MEDIA_TYPE,
    }
}

const STEP_LINES: [&str; 3] = [
    "Uploading to IPFS...",
    "Registering on blockchain...",
    "Saving verification record...",
];

/// Number of steps a run has started by the time it is in `state`.
fn steps_reached(state: &WorkflowState) -> usize {
    match state {
        WorkflowState::Idle => 0,
        WorkflowState::Uploading | WorkflowState::Failed(FailureCause::StoreUnavailable) => 1,
        WorkflowState::Registering
        | WorkflowState::Failed(FailureCause::RegistrationRejected) => 2,
        WorkflowState::Persisting
        | WorkflowState::Verified
        | WorkflowState::Failed(FailureCause::PersistenceFailed) => 3,
    }
}

/// Tracks which step lines have been printed.
///
/// State observers may skip intermediate states, so each observed state
/// yields every line between the last one shown and the step it implies.
#[derive(Debug, Default)]
pub struct Progress {
    shown: usize,
}

impl Progress {
    pub fn advance(&mut self, state: &WorkflowState) -> &'static [&'static str] {
        let reached = steps_reached(state);
        if reached <= self.shown {
            return &[];
        }
        let from = self.shown;
        self.shown = reached;
        &STEP_LINES[from..reached]
    }
}

/// Human-readable result panel.
pub fn result_panel(result: &VerificationResult, explorer_base: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Verified AI Content: {}", result.file_name);
    let rows = [
        ("AI Confidence", format!("{}%", result.confidence)),
        ("AI Model", result.model.clone()),
        ("Creator", result.creator.to_string()),
        ("Creation Date", result.creation_date.to_string()),
        (
            "Blockchain Registered",
            if result.registered { "Yes" } else { "No" }.to_string(),
        ),
        ("NFT Status", result.nft_status.clone()),
        ("IPFS URL", result.ipfs_url.to_string()),
        ("Transaction", result.transaction_hash.to_string()),
        (
            "Explorer",
            explorer_tx_url(explorer_base, &result.transaction_hash),
        ),
    ];
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0) + 1;
    for (label, value) in rows {
        let _ = writeln!(out, "  {:<width$} {value}", format!("{label}:"));
    }
    out
}

/// Panel for a run that did not verify.
pub fn unverified_panel(state: &WorkflowState) -> String {
    let mut out = String::from("Unverified Content\n");
    if let Some(cause) = state.failure_cause() {
        let _ = writeln!(out, "  Reason: {cause}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use veriseal_types::{ContentAddress, CreatorIdentity, RegistrationReceipt, Timestamp, TxHash};

    fn result() -> VerificationResult {
        let receipt = RegistrationReceipt {
            transaction_hash: TxHash::new("0xabc").unwrap(),
            timestamp: Timestamp::parse("2024-01-01T00:00:00Z").unwrap(),
        };
        VerificationResult::synthesize(
            "art.png",
            ContentAddress::new("https://cid123.example/art.png").unwrap(),
            &receipt,
            CreatorIdentity::Anonymous,
            Timestamp::from_unix_secs(1_704_067_200),
        )
    }

    #[test]
    fn media_type_from_extension() {
        assert_eq!(guess_media_type(Path::new("a/art.PNG")), "image/png");
        assert_eq!(guess_media_type(Path::new("clip.jpeg")), "image/jpeg");
        assert_eq!(guess_media_type(Path::new("noext")), FALLBACK_MEDIA_TYPE);
    }

    #[test]
    fn panel_lists_every_field() {
        let panel = result_panel(&result(), "https://etherscan.io");
        for needle in [
            "art.png",
            "96.8%",
            "Stable Diffusion XL",
            "Anonymous",
            "Yes",
            "Ready to Mint",
            "https://cid123.example/art.png",
            "https://etherscan.io/tx/0xabc",
        ] {
            assert!(panel.contains(needle), "missing {needle} in:\n{panel}");
        }
    }

    #[test]
    fn unverified_panel_names_cause() {
        let panel = unverified_panel(&WorkflowState::Failed(FailureCause::StoreUnavailable));
        assert!(panel.starts_with("Unverified Content"));
        assert!(panel.contains("Reason:"));
    }

    #[test]
    fn progress_fills_in_skipped_states() {
        let mut progress = Progress::default();
        assert!(progress.advance(&WorkflowState::Idle).is_empty());
        assert_eq!(progress.advance(&WorkflowState::Uploading), &STEP_LINES[..1]);
        assert_eq!(progress.advance(&WorkflowState::Verified), &STEP_LINES[1..]);
        assert!(progress.advance(&WorkflowState::Verified).is_empty());
    }

    #[test]
    fn progress_stops_at_failed_step() {
        let mut progress = Progress::default();
        let failed = WorkflowState::Failed(FailureCause::RegistrationRejected);
        assert_eq!(progress.advance(&failed), &STEP_LINES[..2]);
    }
}

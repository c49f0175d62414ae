//! End-to-end workflow tests: the controller wired to nullable collaborators.
//!
//! These cover call ordering, short-circuiting on failure, run exclusivity,
//! per-step deadlines and the result invariant.

use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;
use veriseal_nullables::{
    CallLog, NullClock, NullContentStore, NullFailure, NullRecordStore, NullRegistrar, NullWallet,
};
use veriseal_types::{FailureCause, UploadCandidate, WorkflowState};
use veriseal_verification::{
    Collaborators, NotificationLevel, StepDeadlines, WorkflowController, WorkflowError,
};

const STORE_URL: &str = "https://cid123.example/art.png";
const WALLET: &str = "0x52908400098527886e0f7030069857d2e4169ee7";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Harness {
    log: CallLog,
    store: Arc<NullContentStore>,
    registrar: Arc<NullRegistrar>,
    records: Arc<NullRecordStore>,
    wallet: Arc<NullWallet>,
}

impl Harness {
    fn new() -> Self {
        Self::build(
            NullContentStore::returning(STORE_URL),
            NullRegistrar::returning("0xabc", "2024-01-01T00:00:00Z"),
            NullRecordStore::new(),
        )
    }

    fn build(store: NullContentStore, registrar: NullRegistrar, records: NullRecordStore) -> Self {
        let log = CallLog::new();
        Self {
            store: Arc::new(store.with_log(log.clone())),
            registrar: Arc::new(registrar.with_log(log.clone())),
            records: Arc::new(records.with_log(log.clone())),
            wallet: Arc::new(NullWallet::disconnected()),
            log,
        }
    }

    fn controller(&self) -> WorkflowController {
        WorkflowController::new(Collaborators {
            content_store: self.store.clone(),
            registrar: self.registrar.clone(),
            record_store: self.records.clone(),
            wallet: self.wallet.clone(),
            clock: Arc::new(NullClock::new(1_704_067_200)),
        })
    }
}

fn art() -> UploadCandidate {
    UploadCandidate::new("art.png", "image/png", vec![0u8; 1024])
}

// ---------------------------------------------------------------------------
// 1. Selection and invalid input
// ---------------------------------------------------------------------------

#[tokio::test]
async fn run_without_candidate_has_no_side_effects() {
    let h = Harness::new();
    let ctl = h.controller();
    let mut notes = ctl.notifier().subscribe();

    assert_eq!(ctl.run_verification().await, Err(WorkflowError::InvalidCandidate));
    assert_eq!(ctl.current_state(), WorkflowState::Idle);
    assert!(ctl.current_result().is_none());
    assert!(h.log.is_empty());
    assert!(notes.try_recv().is_err());
}

proptest! {
    /// Selecting any file puts the controller back to Idle with no result,
    /// whatever the previous run did.
    #[test]
    fn select_resets_to_idle(
        name in "[a-z]{1,10}\\.[a-z]{2,4}",
        media in "(image|text|audio|video)/[a-z]{2,6}",
        len in 0usize..2048,
        previous_run_fails in any::<bool>(),
    ) {
        let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        rt.block_on(async {
            let h = Harness::new();
            if previous_run_fails {
                h.store.set_failure(Some(NullFailure::Unavailable));
            }
            let ctl = h.controller();
            ctl.select_candidate(art());
            ctl.run_verification().await.unwrap();

            ctl.select_candidate(UploadCandidate::new(name.clone(), media, vec![1u8; len]));
            prop_assert_eq!(ctl.current_state(), WorkflowState::Idle);
            prop_assert!(ctl.current_result().is_none());
            let candidate = ctl.current_candidate().unwrap();
            prop_assert_eq!(candidate.name(), name.as_str());
            Ok(())
        })?;
    }

    /// Whichever step fails, later steps are never called and the failure
    /// cause names the step.
    #[test]
    fn first_failure_short_circuits(failing_step in 0usize..3) {
        let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        rt.block_on(async {
            let records = if failing_step == 2 {
                NullRecordStore::failing(NullFailure::Http(500))
            } else {
                NullRecordStore::new()
            };
            let h = Harness::build(
                NullContentStore::returning(STORE_URL),
                NullRegistrar::returning("0xabc", "2024-01-01T00:00:00Z"),
                records,
            );
            match failing_step {
                0 => h.store.set_failure(Some(NullFailure::Unavailable)),
                1 => h.registrar.set_failure(Some(NullFailure::Rejected)),
                _ => {}
            }

            let ctl = h.controller();
            ctl.select_candidate(art());
            let state = ctl.run_verification().await.unwrap();

            let expected = [
                FailureCause::StoreUnavailable,
                FailureCause::RegistrationRejected,
                FailureCause::PersistenceFailed,
            ][failing_step];
            prop_assert_eq!(state, WorkflowState::Failed(expected));
            prop_assert_eq!(h.log.entries().len(), failing_step + 1);
            prop_assert!(ctl.current_result().is_none());
            Ok(())
        })?;
    }
}

// ---------------------------------------------------------------------------
// 2. Happy path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn end_to_end_example() {
    let h = Harness::new();
    let ctl = h.controller();
    let mut notes = ctl.notifier().subscribe();
    ctl.select_candidate(art());

    assert_eq!(ctl.run_verification().await, Ok(WorkflowState::Verified));
    assert_eq!(
        h.log.entries(),
        vec![
            NullContentStore::CALL,
            NullRegistrar::CALL,
            NullRecordStore::CALL
        ]
    );

    let result = ctl.current_result().expect("verified run exposes a result");
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["confidence"], 96.8);
    assert_eq!(json["creator"], "Anonymous");
    assert_eq!(json["registered"], true);
    assert_eq!(json["transactionHash"], "0xabc");
    assert_eq!(json["ipfsUrl"], STORE_URL);

    let note = notes.recv().await.unwrap();
    assert_eq!(note.level, NotificationLevel::Success);
    assert_eq!(note.message, "Content verified and registered successfully!");
}

#[tokio::test]
async fn collaborators_receive_candidate_data() {
    let h = Harness::new();
    h.wallet.connect(WALLET.parse().unwrap());
    let ctl = h.controller();
    ctl.select_candidate(art());
    ctl.run_verification().await.unwrap();

    assert_eq!(h.store.stored()[0].name(), "art.png");

    let (address, metadata) = h.registrar.requests().remove(0);
    assert_eq!(address.as_str(), STORE_URL);
    assert_eq!(metadata.file_name(), Some("art.png"));
    assert_eq!(metadata.file_size(), Some(1024));

    let record = h.records.records().remove(0);
    assert_eq!(record.file_type, "image/png");
    assert_eq!(record.ipfs_url.as_str(), STORE_URL);
    assert_eq!(record.transaction_hash.as_str(), "0xabc");
    assert_eq!(record.verification_date.to_iso8601(), "2024-01-01T00:00:00.000Z");

    assert_eq!(ctl.current_result().unwrap().creator.to_string(), WALLET);
}

// ---------------------------------------------------------------------------
// 3. Failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn store_failure_never_reaches_registrar_or_records() {
    let h = Harness::build(
        NullContentStore::failing(NullFailure::Unavailable),
        NullRegistrar::returning("0xabc", "2024-01-01T00:00:00Z"),
        NullRecordStore::new(),
    );
    let ctl = h.controller();
    let mut notes = ctl.notifier().subscribe();
    ctl.select_candidate(art());

    assert_eq!(
        ctl.run_verification().await,
        Ok(WorkflowState::Failed(FailureCause::StoreUnavailable))
    );
    assert_eq!(h.registrar.call_count(), 0);
    assert_eq!(h.records.call_count(), 0);

    let note = notes.recv().await.unwrap();
    assert_eq!(note.level, NotificationLevel::Error);
    assert_eq!(note.message, "Failed to verify content");
}

#[tokio::test]
async fn registrar_failure_never_reaches_records() {
    let h = Harness::build(
        NullContentStore::returning(STORE_URL),
        NullRegistrar::failing(NullFailure::Rejected),
        NullRecordStore::new(),
    );
    let ctl = h.controller();
    ctl.select_candidate(art());

    assert_eq!(
        ctl.run_verification().await,
        Ok(WorkflowState::Failed(FailureCause::RegistrationRejected))
    );
    assert_eq!(h.store.call_count(), 1);
    assert_eq!(h.records.call_count(), 0);
}

#[tokio::test]
async fn failed_run_can_be_retried_after_reselect() {
    let h = Harness::new();
    h.registrar.set_failure(Some(NullFailure::Declined));
    let ctl = h.controller();
    ctl.select_candidate(art());
    ctl.run_verification().await.unwrap();
    assert!(ctl.current_state().failure_cause().is_some());

    h.registrar.set_failure(None);
    ctl.select_candidate(art());
    assert_eq!(ctl.run_verification().await, Ok(WorkflowState::Verified));
    assert_eq!(h.store.call_count(), 2);
    assert_eq!(ctl.stats().runs_failed, 1);
    assert_eq!(ctl.stats().runs_verified, 1);
}

// ---------------------------------------------------------------------------
// 4. Exclusivity
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn concurrent_runs_make_one_call_sequence() {
    let h = Harness::build(
        NullContentStore::returning(STORE_URL).with_delay(Duration::from_millis(500)),
        NullRegistrar::returning("0xabc", "2024-01-01T00:00:00Z"),
        NullRecordStore::new(),
    );
    let ctl = h.controller();
    ctl.select_candidate(art());

    let (first, second) = tokio::join!(ctl.run_verification(), ctl.run_verification());

    assert_eq!(first, Ok(WorkflowState::Verified));
    assert_eq!(second, Err(WorkflowError::RunInProgress));
    assert_eq!(h.log.count(NullContentStore::CALL), 1);
    assert_eq!(h.log.entries().len(), 3);
    assert_eq!(ctl.stats().runs_started, 1);
    assert_eq!(ctl.stats().runs_ignored, 1);
}

#[tokio::test(start_paused = true)]
async fn reselect_during_run_applies_to_next_run() {
    let h = Harness::build(
        NullContentStore::returning(STORE_URL).with_delay(Duration::from_millis(500)),
        NullRegistrar::returning("0xabc", "2024-01-01T00:00:00Z"),
        NullRecordStore::new(),
    );
    let ctl = h.controller();
    ctl.select_candidate(art());

    let run = ctl.run_verification();
    let reselect = async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(ctl.is_running());
        ctl.select_candidate(UploadCandidate::new("next.txt", "text/plain", b"x".to_vec()));
        assert_eq!(ctl.current_state(), WorkflowState::Uploading);
    };
    let (state, ()) = tokio::join!(run, reselect);

    assert_eq!(state, Ok(WorkflowState::Verified));
    assert_eq!(ctl.current_result().unwrap().file_name, "art.png");
    assert_eq!(ctl.current_candidate().unwrap().name(), "next.txt");
    assert_eq!(h.records.records()[0].file_name, "art.png");
}

// ---------------------------------------------------------------------------
// 5. Deadlines
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn upload_deadline_fails_fast() {
    let h = Harness::build(
        NullContentStore::returning(STORE_URL).with_delay(Duration::from_secs(30)),
        NullRegistrar::returning("0xabc", "2024-01-01T00:00:00Z"),
        NullRecordStore::new(),
    );
    let ctl = h.controller().with_deadlines(StepDeadlines {
        upload: Some(Duration::from_secs(5)),
        ..StepDeadlines::none()
    });
    ctl.select_candidate(art());

    let started = tokio::time::Instant::now();
    assert_eq!(
        ctl.run_verification().await,
        Ok(WorkflowState::Failed(FailureCause::StoreUnavailable))
    );
    assert!(started.elapsed() < Duration::from_secs(30));
    assert_eq!(h.registrar.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn register_deadline_maps_to_registration_rejected() {
    let h = Harness::build(
        NullContentStore::returning(STORE_URL),
        NullRegistrar::returning("0xabc", "2024-01-01T00:00:00Z")
            .with_delay(Duration::from_secs(2)),
        NullRecordStore::new(),
    );
    let ctl = h.controller().with_deadlines(StepDeadlines::uniform(Duration::from_secs(1)));
    ctl.select_candidate(art());

    assert_eq!(
        ctl.run_verification().await,
        Ok(WorkflowState::Failed(FailureCause::RegistrationRejected))
    );
    assert_eq!(h.records.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn persist_deadline_maps_to_persistence_failed() {
    let h = Harness::build(
        NullContentStore::returning(STORE_URL),
        NullRegistrar::returning("0xabc", "2024-01-01T00:00:00Z"),
        NullRecordStore::new().with_delay(Duration::from_secs(10)),
    );
    let ctl = h.controller().with_deadlines(StepDeadlines {
        persist: Some(Duration::from_secs(3)),
        ..StepDeadlines::none()
    });
    ctl.select_candidate(art());

    let started = tokio::time::Instant::now();
    assert_eq!(
        ctl.run_verification().await,
        Ok(WorkflowState::Failed(FailureCause::PersistenceFailed))
    );
    assert!(started.elapsed() < Duration::from_secs(10));
    assert!(ctl.current_result().is_none());
    assert_eq!(h.registrar.call_count(), 1);
    assert!(h.records.records().is_empty());
}

#[tokio::test(start_paused = true)]
async fn generous_deadlines_do_not_interfere() {
    let h = Harness::build(
        NullContentStore::returning(STORE_URL).with_delay(Duration::from_millis(200)),
        NullRegistrar::returning("0xabc", "2024-01-01T00:00:00Z")
            .with_delay(Duration::from_millis(200)),
        NullRecordStore::new().with_delay(Duration::from_millis(200)),
    );
    let ctl = h.controller().with_deadlines(StepDeadlines::uniform(Duration::from_secs(1)));
    ctl.select_candidate(art());
    assert_eq!(ctl.run_verification().await, Ok(WorkflowState::Verified));
}

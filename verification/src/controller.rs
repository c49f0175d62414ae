//! Verification workflow controller.
//!
//! Drives one file at a time through `Idle → Uploading → Registering →
//! Persisting → Verified | Failed`. Each step consumes the previous step's
//! output, so the collaborator calls are strictly sequential and the first
//! failure ends the run. Nothing is retried; the caller starts a new run.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use tokio::sync::watch;
use tracing::{debug, error, info, warn, Instrument};
use veriseal_store::{
    Clock, CollaboratorError, ContentStore, LedgerRegistrar, RecordStore, WalletCapability,
};
use veriseal_types::{
    ContentMetadata, CreatorIdentity, FailureCause, UploadCandidate, VerificationRecord,
    VerificationResult, WorkflowState,
};
use veriseal_utils::{format_duration, StatsCounter};

use crate::notify::{self, Notifier};
use crate::spans;
use crate::{StepDeadlines, WorkflowError};

const RUNS_STARTED: &str = "runs_started";
const RUNS_VERIFIED: &str = "runs_verified";
const RUNS_FAILED: &str = "runs_failed";
const RUNS_IGNORED: &str = "runs_ignored";
const RUNS_ABANDONED: &str = "runs_abandoned";

/// The external capabilities a controller is wired to.
#[derive(Clone)]
pub struct Collaborators {
    pub content_store: Arc<dyn ContentStore>,
    pub registrar: Arc<dyn LedgerRegistrar>,
    pub record_store: Arc<dyn RecordStore>,
    pub wallet: Arc<dyn WalletCapability>,
    pub clock: Arc<dyn Clock>,
}

/// Counters over the controller's lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorkflowStats {
    pub runs_started: u64,
    pub runs_verified: u64,
    pub runs_failed: u64,
    /// Calls rejected with no candidate or while another run was active.
    pub runs_ignored: u64,
    /// Runs whose future was dropped mid-step.
    pub runs_abandoned: u64,
}

/// Everything that must change together. Guarded by one mutex that is
/// never held across an `.await`.
#[derive(Default)]
struct Slot {
    candidate: Option<UploadCandidate>,
    state: WorkflowState,
    result: Option<VerificationResult>,
    running: bool,
}

/// A step that ended the run.
struct StepFailure {
    cause: FailureCause,
    source: CollaboratorError,
}

/// Owns the verification state machine for one presentation surface.
pub struct WorkflowController {
    collaborators: Collaborators,
    deadlines: StepDeadlines,
    notifier: Notifier,
    slot: Mutex<Slot>,
    state_tx: watch::Sender<WorkflowState>,
    stats: StatsCounter,
}

impl WorkflowController {
    pub fn new(collaborators: Collaborators) -> Self {
        let (state_tx, _) = watch::channel(WorkflowState::Idle);
        Self {
            collaborators,
            deadlines: StepDeadlines::none(),
            notifier: Notifier::new(),
            slot: Mutex::new(Slot::default()),
            state_tx,
            stats: StatsCounter::new(&[
                RUNS_STARTED,
                RUNS_VERIFIED,
                RUNS_FAILED,
                RUNS_IGNORED,
                RUNS_ABANDONED,
            ]),
        }
    }

    pub fn with_deadlines(mut self, deadlines: StepDeadlines) -> Self {
        self.deadlines = deadlines;
        self
    }

    /// Publish notifications through a shared notifier instead of a private one.
    pub fn with_notifier(mut self, notifier: Notifier) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn deadlines(&self) -> StepDeadlines {
        self.deadlines
    }

    // ── Observers ──────────────────────────────────────────────────────

    pub fn current_state(&self) -> WorkflowState {
        self.lock().state
    }

    /// The result of the last run, present only while the state is `Verified`.
    pub fn current_result(&self) -> Option<VerificationResult> {
        self.lock().result.clone()
    }

    pub fn current_candidate(&self) -> Option<UploadCandidate> {
        self.lock().candidate.clone()
    }

    pub fn is_running(&self) -> bool {
        self.lock().running
    }

    /// A receiver that sees every state transition.
    pub fn subscribe_state(&self) -> watch::Receiver<WorkflowState> {
        self.state_tx.subscribe()
    }

    pub fn stats(&self) -> WorkflowStats {
        WorkflowStats {
            runs_started: self.stats.get(RUNS_STARTED),
            runs_verified: self.stats.get(RUNS_VERIFIED),
            runs_failed: self.stats.get(RUNS_FAILED),
            runs_ignored: self.stats.get(RUNS_IGNORED),
            runs_abandoned: self.stats.get(RUNS_ABANDONED),
        }
    }

    // ── Commands ───────────────────────────────────────────────────────

    /// Replace the selected file.
    ///
    /// When no run is active this clears any result and resets the state to
    /// `Idle`. While a run is in flight the run keeps the file it started
    /// with and the new selection only applies to the next run.
    pub fn select_candidate(&self, candidate: UploadCandidate) {
        let mut slot = self.lock();
        debug!(?candidate, "candidate selected");
        slot.candidate = Some(candidate);
        if slot.running {
            debug!("run in flight; new candidate applies to the next run");
            return;
        }
        slot.result = None;
        slot.state = WorkflowState::Idle;
        self.publish(&slot);
    }

    /// Run the full upload → register → persist sequence for the selected file.
    ///
    /// Returns the terminal state of the run. Returns an error, without
    /// touching any collaborator, when no file is selected or a run is
    /// already in progress. Dropping the returned future mid-run puts the
    /// controller back to `Idle` so the next run can start.
    pub async fn run_verification(&self) -> Result<WorkflowState, WorkflowError> {
        let candidate = self.begin_run()?;
        let guard = RunGuard {
            controller: self,
            finished: false,
        };
        let span = spans::run_span(candidate.name(), candidate.size());

        async move {
            let started = Instant::now();
            let outcome = self.drive(&candidate).await;
            let state = guard.finish(outcome);
            info!(%state, elapsed = %format_duration(started.elapsed()), "run finished");
            Ok(state)
        }
        .instrument(span)
        .await
    }

    // ── Run internals ──────────────────────────────────────────────────

    fn begin_run(&self) -> Result<UploadCandidate, WorkflowError> {
        let mut slot = self.lock();
        if slot.running {
            self.stats.increment(RUNS_IGNORED);
            warn!("verification already running; ignoring request");
            return Err(WorkflowError::RunInProgress);
        }
        let Some(candidate) = slot.candidate.clone() else {
            self.stats.increment(RUNS_IGNORED);
            warn!("no file selected; nothing to verify");
            return Err(WorkflowError::InvalidCandidate);
        };

        slot.running = true;
        slot.result = None;
        slot.state = WorkflowState::Uploading;
        self.publish(&slot);
        self.stats.increment(RUNS_STARTED);
        Ok(candidate)
    }

    async fn drive(&self, candidate: &UploadCandidate) -> Result<VerificationResult, StepFailure> {
        let c = &self.collaborators;

        let address = self
            .step(
                "upload",
                self.deadlines.upload,
                FailureCause::StoreUnavailable,
                c.content_store.store(candidate),
            )
            .await?;
        info!(%address, "content stored");
        self.advance(WorkflowState::Registering);

        let metadata = ContentMetadata::from_candidate(candidate);
        let receipt = self
            .step(
                "register",
                self.deadlines.register,
                FailureCause::RegistrationRejected,
                c.registrar.register(&address, &metadata),
            )
            .await?;
        info!(tx = %receipt.transaction_hash, at = %receipt.timestamp, "content registered");
        self.advance(WorkflowState::Persisting);

        let record = VerificationRecord::new(candidate, &address, &receipt);
        self.step(
            "persist",
            self.deadlines.persist,
            FailureCause::PersistenceFailed,
            c.record_store.insert(&record),
        )
        .await?;

        // The wallet is read here and nowhere else.
        let creator = CreatorIdentity::from_wallet(c.wallet.connected_address());
        Ok(VerificationResult::synthesize(
            candidate.name(),
            address,
            &receipt,
            creator,
            c.clock.now(),
        ))
    }

    async fn step<T, F>(
        &self,
        name: &'static str,
        deadline: Option<Duration>,
        cause: FailureCause,
        call: F,
    ) -> Result<T, StepFailure>
    where
        F: Future<Output = Result<T, CollaboratorError>>,
    {
        let outcome = async {
            match deadline {
                Some(limit) => tokio::time::timeout(limit, call)
                    .await
                    .unwrap_or_else(|_| Err(CollaboratorError::Timeout(limit))),
                None => call.await,
            }
        }
        .instrument(spans::step_span(name))
        .await;

        outcome.map_err(|source| {
            error!(step = name, %cause, error = %source, "workflow step failed");
            StepFailure { cause, source }
        })
    }

    fn advance(&self, state: WorkflowState) {
        let mut slot = self.lock();
        slot.state = state;
        self.publish(&slot);
    }

    fn finish_run(&self, outcome: Result<VerificationResult, StepFailure>) -> WorkflowState {
        let mut slot = self.lock();
        slot.running = false;
        match outcome {
            Ok(result) => {
                slot.state = WorkflowState::Verified;
                slot.result = Some(result);
                self.stats.increment(RUNS_VERIFIED);
                self.notifier.success(notify::VERIFY_SUCCEEDED);
            }
            Err(failure) => {
                debug!(source = ?failure.source, "run failed");
                slot.state = WorkflowState::Failed(failure.cause);
                slot.result = None;
                self.stats.increment(RUNS_FAILED);
                self.notifier.error(notify::VERIFY_FAILED);
            }
        }
        self.publish(&slot);
        slot.state
    }

    /// A run whose future was dropped before reaching a terminal state.
    fn abandon_run(&self) {
        let mut slot = self.lock();
        warn!(state = %slot.state, "run dropped before completion");
        slot.running = false;
        slot.result = None;
        slot.state = WorkflowState::Idle;
        self.stats.increment(RUNS_ABANDONED);
        self.publish(&slot);
    }

    fn publish(&self, slot: &Slot) {
        self.state_tx.send_replace(slot.state);
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Releases the run flag if the run future is dropped mid-step.
struct RunGuard<'a> {
    controller: &'a WorkflowController,
    finished: bool,
}

impl RunGuard<'_> {
    fn finish(mut self, outcome: Result<VerificationResult, StepFailure>) -> WorkflowState {
        self.finished = true;
        self.controller.finish_run(outcome)
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.controller.abandon_run();
        }
    }
}

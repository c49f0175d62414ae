use thiserror::Error;
use veriseal_store::CollaboratorError;

/// Why `run_verification` did not start a run.
///
/// Failures *during* a run are not errors of the call; they end the run in
/// `WorkflowState::Failed` with a `FailureCause`.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("no file selected")]
    InvalidCandidate,

    #[error("a verification run is already in progress")]
    RunInProgress,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("another sign-in or sign-out is still in progress")]
    Busy,

    #[error("identity provider error: {0}")]
    Identity(#[from] CollaboratorError),
}

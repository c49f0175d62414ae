//! Workflow state and failure causes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a verification run ended in [`WorkflowState::Failed`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureCause {
    /// The content store call failed, was rejected, or timed out.
    StoreUnavailable,
    /// The ledger registrar failed, rejected, timed out, or the signature was declined.
    RegistrationRejected,
    /// The record store call failed or timed out.
    PersistenceFailed,
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::StoreUnavailable => "content store unavailable",
            Self::RegistrationRejected => "ledger registration rejected",
            Self::PersistenceFailed => "record persistence failed",
        };
        f.write_str(s)
    }
}

/// The phase a verification workflow is in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkflowState {
    /// Nothing running; a candidate may or may not be selected.
    #[default]
    Idle,
    /// Sending the candidate to the content store.
    Uploading,
    /// Recording the content address on the ledger.
    Registering,
    /// Writing the verification record.
    Persisting,
    /// Run finished; a result is available.
    Verified,
    /// Run finished without a result.
    Failed(FailureCause),
}

impl WorkflowState {
    /// Whether the run has finished (successfully or not).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Verified | Self::Failed(_))
    }

    /// Whether a run is actively calling a collaborator.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Uploading | Self::Registering | Self::Persisting)
    }

    pub fn failure_cause(&self) -> Option<FailureCause> {
        match self {
            Self::Failed(cause) => Some(*cause),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Uploading => "uploading",
            Self::Registering => "registering",
            Self::Persisting => "persisting",
            Self::Verified => "verified",
            Self::Failed(_) => "failed",
        }
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(cause) => write!(f, "failed ({cause})"),
            other => f.write_str(other.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_and_in_flight_are_disjoint() {
        let all = [
            WorkflowState::Idle,
            WorkflowState::Uploading,
            WorkflowState::Registering,
            WorkflowState::Persisting,
            WorkflowState::Verified,
            WorkflowState::Failed(FailureCause::StoreUnavailable),
        ];
        for s in all {
            assert!(!(s.is_terminal() && s.is_in_flight()), "{s}");
        }
        assert!(!WorkflowState::Idle.is_terminal());
        assert!(!WorkflowState::Idle.is_in_flight());
    }

    #[test]
    fn failure_cause_only_on_failed() {
        assert_eq!(
            WorkflowState::Failed(FailureCause::PersistenceFailed).failure_cause(),
            Some(FailureCause::PersistenceFailed)
        );
        assert_eq!(WorkflowState::Verified.failure_cause(), None);
        assert_eq!(WorkflowState::default(), WorkflowState::Idle);
    }
}

//! [`tracing::Span`] constructors for workflow operations.

use tracing::{info_span, Span};

/// Span covering one verification run, from upload to terminal state.
pub fn run_span(file_name: &str, size: u64) -> Span {
    info_span!("verification_run", file = %file_name, size)
}

/// Span covering a single collaborator call inside a run.
pub fn step_span(step: &'static str) -> Span {
    info_span!("workflow_step", step)
}

/// Span covering a sign-in or sign-out action.
pub fn identity_span(action: &'static str) -> Span {
    info_span!("identity", action)
}

//! Optional per-step deadlines.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upper bounds on how long each workflow step may take.
///
/// `None` means the step waits for the collaborator indefinitely. An
/// elapsed deadline fails the step with the same cause as a collaborator
/// error would.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDeadlines {
    pub upload: Option<Duration>,
    pub register: Option<Duration>,
    pub persist: Option<Duration>,
}

impl StepDeadlines {
    /// No deadlines at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// The same deadline for every step.
    pub fn uniform(limit: Duration) -> Self {
        Self {
            upload: Some(limit),
            register: Some(limit),
            persist: Some(limit),
        }
    }

    /// Build from millisecond values, treating `0` as "no deadline".
    pub fn from_millis(upload: u64, register: u64, persist: u64) -> Self {
        let opt = |ms: u64| (ms > 0).then(|| Duration::from_millis(ms));
        Self {
            upload: opt(upload),
            register: opt(register),
            persist: opt(persist),
        }
    }
}

//! Scriptable failure modes.

use veriseal_store::CollaboratorError;

/// How a nullable collaborator should fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NullFailure {
    Unavailable,
    Rejected,
    /// The user declined to sign.
    Declined,
    Http(u16),
}

impl NullFailure {
    pub fn to_error(self, context: &str) -> CollaboratorError {
        match self {
            Self::Unavailable => CollaboratorError::Unavailable(format!("{context} (null)")),
            Self::Rejected => CollaboratorError::Rejected(format!("{context} (null)")),
            Self::Declined => CollaboratorError::Declined,
            Self::Http(status) => CollaboratorError::Http {
                status,
                body: format!("{context} (null)"),
            },
        }
    }
}

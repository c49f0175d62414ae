//! Client construction errors.

use thiserror::Error;

/// Errors raised while constructing a client. Errors from individual calls
/// are reported as `CollaboratorError`.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to create HTTP client: {0}")]
    Build(String),

    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("missing credential: {0}")]
    MissingCredential(&'static str),
}

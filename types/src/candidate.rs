//! The user-selected file that a verification run operates on.

use std::fmt;
use std::sync::Arc;

/// A file selected for verification.
///
/// Immutable once constructed. The payload is reference counted so a run can
/// hold onto the candidate it started with while a new one is selected.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadCandidate {
    name: String,
    media_type: String,
    payload: Arc<[u8]>,
}

impl UploadCandidate {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            payload: payload.into(),
        }
    }

    /// Display name of the file.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared media type, e.g. `image/png`.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Size of the payload in bytes.
    pub fn size(&self) -> u64 {
        self.payload.len() as u64
    }

    /// Whether a preview can be rendered for this file.
    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }
}

impl fmt::Debug for UploadCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadCandidate")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("size", &self.size())
            .finish()
    }
}

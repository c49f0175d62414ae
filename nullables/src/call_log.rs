//! Shared, ordered log of collaborator calls.

use std::sync::{Arc, Mutex};

/// Records the order in which nullable collaborators were invoked.
///
/// Clone it into several nullables to observe a single global sequence.
#[derive(Clone, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<&'static str>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, name: &'static str) {
        self.entries.lock().unwrap().push(name);
    }

    /// All calls so far, in order.
    pub fn entries(&self) -> Vec<&'static str> {
        self.entries.lock().unwrap().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.entries.lock().unwrap().iter().filter(|e| **e == name).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

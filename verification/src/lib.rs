//! Content verification workflow.
//!
//! A selected file moves through three strictly ordered collaborator calls:
//! 1. **Upload** to a content-addressed store, yielding a public URL.
//! 2. **Register** that URL on a ledger, yielding a transaction hash and time.
//! 3. **Persist** a verification record in a hosted database.
//!
//! [`WorkflowController`] owns the state machine and is the only thing a
//! presentation layer talks to. Authentication and wallet presence are
//! tracked separately by [`SessionObserver`]; they never drive the workflow.

pub mod controller;
pub mod deadlines;
pub mod error;
pub mod notify;
pub mod session;
pub mod spans;

pub use controller::{Collaborators, WorkflowController, WorkflowStats};
pub use deadlines::StepDeadlines;
pub use error::{SessionError, WorkflowError};
pub use notify::{Notification, NotificationLevel, Notifier};
pub use session::SessionObserver;

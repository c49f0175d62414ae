//! Federated identity provider trait.

use async_trait::async_trait;
use tokio::sync::watch;
use veriseal_types::Session;

use crate::CollaboratorError;

/// An externally managed authentication session.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The current session, if any.
    async fn get_session(&self) -> Result<Option<Session>, CollaboratorError>;

    /// A receiver that observes every session change. Dropping it unsubscribes.
    fn on_session_change(&self) -> watch::Receiver<Option<Session>>;

    /// Begin sign-in with the named federated provider (e.g. `github`).
    async fn sign_in(&self, provider: &str) -> Result<(), CollaboratorError>;

    async fn sign_out(&self) -> Result<(), CollaboratorError>;
}

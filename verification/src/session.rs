//! Session and wallet observer.
//!
//! Mirrors the externally managed sign-in session and the wallet connection
//! for the presentation layer. Sign-in and sign-out are fire-and-forget:
//! their outcome is reported through [`Notifier`] and never touches the
//! verification workflow.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn, Instrument};
use veriseal_store::{IdentityProvider, WalletCapability};
use veriseal_types::{Session, WalletAddress};

use crate::notify::{self, Notifier};
use crate::spans;
use crate::SessionError;

pub struct SessionObserver {
    identity: Arc<dyn IdentityProvider>,
    wallet: Arc<dyn WalletCapability>,
    notifier: Notifier,
    session: Arc<watch::Sender<Option<Session>>>,
    busy: AtomicBool,
    listener: Mutex<Option<JoinHandle<()>>>,
}

impl SessionObserver {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        wallet: Arc<dyn WalletCapability>,
        notifier: Notifier,
    ) -> Self {
        let (session, _) = watch::channel(None);
        Self {
            identity,
            wallet,
            notifier,
            session: Arc::new(session),
            busy: AtomicBool::new(false),
            listener: Mutex::new(None),
        }
    }

    // ── Lifecycle ──────────────────────────────────────────────────────

    /// Load the current session and follow changes until [`stop`](Self::stop).
    ///
    /// Calling `start` again replaces the previous listener.
    pub async fn start(&self) -> Result<(), SessionError> {
        // Subscribe first so no change between the fetch and the listener is lost.
        let mut changes = self.identity.on_session_change();
        let initial = self.identity.get_session().await?;
        debug!(signed_in = initial.is_some(), "initial session loaded");
        self.session.send_replace(initial);

        let mirror = Arc::clone(&self.session);
        let handle = tokio::spawn(async move {
            while changes.changed().await.is_ok() {
                let next = changes.borrow_and_update().clone();
                debug!(signed_in = next.is_some(), "session changed");
                mirror.send_replace(next);
            }
        });

        if let Some(previous) = self.listener_slot().replace(handle) {
            previous.abort();
        }
        Ok(())
    }

    /// Stop following session changes. The last observed session is kept.
    pub fn stop(&self) {
        if let Some(handle) = self.listener_slot().take() {
            handle.abort();
        }
    }

    pub fn is_listening(&self) -> bool {
        self.listener_slot()
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }

    // ── Observers ──────────────────────────────────────────────────────

    pub fn session(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    pub fn has_session(&self) -> bool {
        self.session.borrow().is_some()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.session.subscribe()
    }

    pub fn wallet_address(&self) -> Option<WalletAddress> {
        self.wallet.connected_address()
    }

    pub fn wallet_connected(&self) -> bool {
        self.wallet_address().is_some()
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Whether a sign-in or sign-out is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    // ── Actions ────────────────────────────────────────────────────────

    /// Ask the identity provider to sign in with `provider`.
    ///
    /// Failure is reported as a "Failed to sign in" notification as well as
    /// returned.
    pub async fn sign_in(&self, provider: &str) -> Result<(), SessionError> {
        let _busy = self.acquire()?;
        let outcome = self
            .identity
            .sign_in(provider)
            .instrument(spans::identity_span("sign_in"))
            .await;

        match outcome {
            Ok(()) => {
                info!(provider, "sign-in started");
                self.refresh().await;
                Ok(())
            }
            Err(e) => {
                error!(provider, error = %e, "sign-in failed");
                self.notifier.error(notify::SIGN_IN_FAILED);
                Err(e.into())
            }
        }
    }

    pub async fn sign_out(&self) -> Result<(), SessionError> {
        let _busy = self.acquire()?;
        let outcome = self
            .identity
            .sign_out()
            .instrument(spans::identity_span("sign_out"))
            .await;

        match outcome {
            Ok(()) => {
                info!("signed out");
                self.notifier.success(notify::SIGN_OUT_SUCCEEDED);
                self.refresh().await;
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "sign-out failed");
                self.notifier.error(notify::SIGN_OUT_FAILED);
                Err(e.into())
            }
        }
    }

    /// Sign out when a session is present, otherwise sign in.
    pub async fn toggle(&self, provider: &str) -> Result<(), SessionError> {
        if self.has_session() {
            self.sign_out().await
        } else {
            self.sign_in(provider).await
        }
    }

    /// Re-read the session so callers see the effect of an action without
    /// waiting for the listener.
    async fn refresh(&self) {
        match self.identity.get_session().await {
            Ok(current) => {
                self.session.send_replace(current);
            }
            Err(e) => warn!(error = %e, "could not refresh session"),
        }
    }

    fn acquire(&self) -> Result<BusyGuard<'_>, SessionError> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("identity action already in progress");
            return Err(SessionError::Busy);
        }
        Ok(BusyGuard(&self.busy))
    }

    fn listener_slot(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.listener.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl Drop for SessionObserver {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Clears the busy flag when an action finishes, even on early return.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NotificationLevel;
    use veriseal_nullables::{NullFailure, NullIdentity, NullWallet};

    const ADDR: &str = "0x52908400098527886e0f7030069857d2e4169ee7";

    fn observer(identity: Arc<NullIdentity>) -> SessionObserver {
        SessionObserver::new(identity, Arc::new(NullWallet::connected(ADDR)), Notifier::new())
    }

    #[tokio::test]
    async fn start_loads_existing_session() {
        let identity = Arc::new(NullIdentity::signed_in("alice"));
        let obs = observer(identity);
        assert!(!obs.has_session());

        obs.start().await.unwrap();
        assert!(obs.has_session());
        assert_eq!(obs.session().unwrap().user_id, "alice");
        assert!(obs.is_listening());
        assert_eq!(obs.wallet_address().unwrap().as_str(), ADDR);
    }

    #[tokio::test]
    async fn listener_follows_external_changes() {
        let identity = Arc::new(NullIdentity::new());
        let obs = observer(identity.clone());
        obs.start().await.unwrap();
        let mut rx = obs.subscribe();

        identity.set_session(Some(NullIdentity::session_for("bob")));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().as_ref().unwrap().user_id, "bob");

        obs.stop();
        assert!(!obs.is_listening());
    }

    #[tokio::test]
    async fn toggle_signs_in_then_out() {
        let identity = Arc::new(NullIdentity::new());
        let obs = observer(identity.clone());
        let mut notes = obs.notifier.subscribe();
        obs.start().await.unwrap();

        obs.toggle("github").await.unwrap();
        assert!(obs.has_session());

        obs.toggle("github").await.unwrap();
        assert!(!obs.has_session());
        assert_eq!(identity.calls(), vec!["sign_in:github", "sign_out"]);

        let note = notes.recv().await.unwrap();
        assert_eq!(note.level, NotificationLevel::Success);
        assert_eq!(note.message, notify::SIGN_OUT_SUCCEEDED);
    }

    #[tokio::test]
    async fn sign_in_failure_notifies() {
        let identity = Arc::new(NullIdentity::new());
        identity.fail_sign_in(Some(NullFailure::Unavailable));
        let obs = observer(identity);
        let mut notes = obs.notifier.subscribe();

        assert!(matches!(
            obs.sign_in("github").await,
            Err(SessionError::Identity(_))
        ));
        assert!(!obs.is_busy());
        let note = notes.recv().await.unwrap();
        assert_eq!(note.level, NotificationLevel::Error);
        assert_eq!(note.message, notify::SIGN_IN_FAILED);
    }

    #[tokio::test]
    async fn sign_out_failure_keeps_session() {
        let identity = Arc::new(NullIdentity::signed_in("alice"));
        identity.fail_sign_out(Some(NullFailure::Http(503)));
        let obs = observer(identity);
        let mut notes = obs.notifier.subscribe();
        obs.start().await.unwrap();

        assert!(obs.sign_out().await.is_err());
        assert!(obs.has_session());
        assert_eq!(notes.recv().await.unwrap().message, notify::SIGN_OUT_FAILED);
    }
}

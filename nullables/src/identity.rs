//! Nullable identity provider.

use async_trait::async_trait;
use std::sync::Mutex;
use tokio::sync::watch;
use veriseal_store::{CollaboratorError, IdentityProvider};
use veriseal_types::Session;

use crate::NullFailure;

/// An identity provider whose session is set programmatically.
///
/// `sign_in` immediately yields a session for `user-{provider}`;
/// `sign_out` clears it. Either can be made to fail.
pub struct NullIdentity {
    session: watch::Sender<Option<Session>>,
    sign_in_failure: Mutex<Option<NullFailure>>,
    sign_out_failure: Mutex<Option<NullFailure>>,
    calls: Mutex<Vec<String>>,
}

impl NullIdentity {
    pub fn new() -> Self {
        let (session, _) = watch::channel(None);
        Self {
            session,
            sign_in_failure: Mutex::new(None),
            sign_out_failure: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn signed_in(user_id: &str) -> Self {
        let identity = Self::new();
        identity.set_session(Some(Self::session_for(user_id)));
        identity
    }

    pub fn session_for(user_id: &str) -> Session {
        Session {
            user_id: user_id.to_string(),
            email: None,
            access_token: format!("token-{user_id}"),
            expires_at: None,
        }
    }

    /// Push a session change to every subscriber.
    pub fn set_session(&self, session: Option<Session>) {
        self.session.send_replace(session);
    }

    pub fn fail_sign_in(&self, failure: Option<NullFailure>) {
        *self.sign_in_failure.lock().unwrap() = failure;
    }

    pub fn fail_sign_out(&self, failure: Option<NullFailure>) {
        *self.sign_out_failure.lock().unwrap() = failure;
    }

    /// `sign_in:{provider}` / `sign_out` entries in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for NullIdentity {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for NullIdentity {
    async fn get_session(&self) -> Result<Option<Session>, CollaboratorError> {
        Ok(self.session.borrow().clone())
    }

    fn on_session_change(&self) -> watch::Receiver<Option<Session>> {
        self.session.subscribe()
    }

    async fn sign_in(&self, provider: &str) -> Result<(), CollaboratorError> {
        self.calls.lock().unwrap().push(format!("sign_in:{provider}"));
        let failure = *self.sign_in_failure.lock().unwrap();
        if let Some(f) = failure {
            return Err(f.to_error("sign in"));
        }
        self.set_session(Some(Self::session_for(&format!("user-{provider}"))));
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), CollaboratorError> {
        self.calls.lock().unwrap().push("sign_out".to_string());
        let failure = *self.sign_out_failure.lock().unwrap();
        if let Some(f) = failure {
            return Err(f.to_error("sign out"));
        }
        self.set_session(None);
        Ok(())
    }
}

//! Supabase client: verification rows over PostgREST and OAuth sessions
//! over GoTrue.

use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::{RequestBuilder, Url};
use serde::Deserialize;
use tokio::sync::watch;
use tracing::{debug, info};
use veriseal_store::{CollaboratorError, IdentityProvider, RecordStore};
use veriseal_types::{Session, VerificationRecord};

use crate::http::{self, build_client, ensure_success, parse_base_url, transport};
use crate::ClientError;

pub const DEFAULT_TABLE: &str = "verifications";

#[derive(Deserialize)]
struct AuthUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

pub struct SupabaseClient {
    client: reqwest::Client,
    base: Url,
    anon_key: String,
    table: String,
    redirect_to: Option<String>,
    session: watch::Sender<Option<Session>>,
    pending_authorize: Mutex<Option<String>>,
}

impl SupabaseClient {
    pub fn new(url: &str, anon_key: impl Into<String>) -> Result<Self, ClientError> {
        let anon_key = anon_key.into();
        if anon_key.trim().is_empty() {
            return Err(ClientError::MissingCredential("supabase anon key"));
        }
        let (session, _) = watch::channel(None);
        Ok(Self {
            client: build_client()?,
            base: parse_base_url(url)?,
            anon_key,
            table: DEFAULT_TABLE.to_string(),
            redirect_to: None,
            session,
            pending_authorize: Mutex::new(None),
        })
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Where the provider sends the browser after sign-in.
    pub fn with_redirect(mut self, redirect_to: impl Into<String>) -> Self {
        self.redirect_to = Some(redirect_to.into());
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// OAuth authorize URL for `provider`.
    pub fn authorize_url(&self, provider: &str) -> Result<Url, CollaboratorError> {
        let mut url = Url::parse(&http::endpoint(&self.base, "auth/v1/authorize"))
            .map_err(|e| CollaboratorError::Other(e.to_string()))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("provider", provider);
            if let Some(redirect) = &self.redirect_to {
                query.append_pair("redirect_to", redirect);
            }
        }
        Ok(url)
    }

    /// URL produced by the last `sign_in`, still waiting for the browser
    /// round-trip.
    pub fn pending_authorize_url(&self) -> Option<String> {
        self.pending_slot().clone()
    }

    /// Complete sign-in with an access token returned by the provider.
    pub async fn set_session(&self, access_token: &str) -> Result<Session, CollaboratorError> {
        let response = self
            .client
            .get(http::endpoint(&self.base, "auth/v1/user"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(transport)?;
        let user: AuthUser = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(transport)?;

        let session = Session {
            user_id: user.id,
            email: user.email,
            access_token: access_token.to_string(),
            expires_at: None,
        };
        info!(user = session.display_name(), "session established");
        self.pending_slot().take();
        self.session.send_replace(Some(session.clone()));
        Ok(session)
    }

    /// Forget the local session without contacting the server.
    pub fn clear_session(&self) {
        self.session.send_replace(None);
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        let bearer = self
            .session
            .borrow()
            .as_ref()
            .map(|s| s.access_token.clone())
            .unwrap_or_else(|| self.anon_key.clone());
        builder.header("apikey", &self.anon_key).bearer_auth(bearer)
    }

    fn pending_slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.pending_authorize
            .lock()
            .unwrap_or_else(|p| p.into_inner())
    }
}

#[async_trait]
impl RecordStore for SupabaseClient {
    async fn insert(&self, record: &VerificationRecord) -> Result<(), CollaboratorError> {
        debug!(table = %self.table, file = %record.file_name, "inserting verification row");
        let request = self
            .client
            .post(http::endpoint(&self.base, &format!("rest/v1/{}", self.table)))
            .header("Prefer", "return=minimal")
            .json(record);
        let response = self.authorized(request).send().await.map_err(transport)?;
        ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl IdentityProvider for SupabaseClient {
    async fn get_session(&self) -> Result<Option<Session>, CollaboratorError> {
        Ok(self.session.borrow().clone())
    }

    fn on_session_change(&self) -> watch::Receiver<Option<Session>> {
        self.session.subscribe()
    }

    async fn sign_in(&self, provider: &str) -> Result<(), CollaboratorError> {
        let url = self.authorize_url(provider)?;
        info!(provider, url = %url, "open the authorize URL to finish signing in");
        *self.pending_slot() = Some(url.into());
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), CollaboratorError> {
        let token = match self.session.borrow().as_ref() {
            Some(s) => s.access_token.clone(),
            None => return Ok(()),
        };
        let response = self
            .client
            .post(http::endpoint(&self.base, "auth/v1/logout"))
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport)?;
        ensure_success(response).await?;
        self.clear_session();
        Ok(())
    }
}

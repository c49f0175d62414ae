//! Authenticated session issued by the identity provider.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Timestamp;

/// A signed-in user session.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    #[serde(default)]
    pub email: Option<String>,
    pub access_token: String,
    #[serde(default)]
    pub expires_at: Option<Timestamp>,
}

impl Session {
    /// Whether the session has expired relative to `now`. Sessions without an
    /// expiry never expire.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }

    /// Name to show for the signed-in user.
    pub fn display_name(&self) -> &str {
        self.email.as_deref().unwrap_or(&self.user_id)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("access_token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(expires_at: Option<i64>) -> Session {
        Session {
            user_id: "u1".into(),
            email: None,
            access_token: "secret-token".into(),
            expires_at: expires_at.map(Timestamp::from_unix_secs),
        }
    }

    #[test]
    fn expiry() {
        let now = Timestamp::from_unix_secs(100);
        assert!(!session(None).is_expired(now));
        assert!(!session(Some(101)).is_expired(now));
        assert!(session(Some(100)).is_expired(now));
    }

    #[test]
    fn debug_redacts_token() {
        let dbg = format!("{:?}", session(None));
        assert!(!dbg.contains("secret-token"));
        assert_eq!(session(None).display_name(), "u1");
    }
}

//! Server-side web session contents.

use secrecy::{ExposeSecret, SecretString};

use crate::domain::foundation::{BackendSession, Timestamp};

use super::SessionUser;

/// What the web session remembers between requests.
#[derive(Debug, Clone, Default)]
pub struct WebSession {
    pub user: Option<SessionUser>,
    pub access_token: Option<SecretString>,
    pub refresh_token: Option<SecretString>,
    /// Absolute expiry of `access_token`.
    pub expires_at: Option<Timestamp>,
}

impl WebSession {
    /// Copies a backend token pair in, computing expiry from `now`.
    pub fn store_tokens(&mut self, session: &BackendSession, now: Timestamp) {
        self.access_token = Some(session.access_token.clone());
        self.refresh_token = Some(session.refresh_token.clone());
        self.expires_at = Some(session.expires_at(now));
    }

    /// Access token, when one is stored.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_ref().map(|t| t.expose_secret().as_str())
    }

    /// Refresh token, when one is stored.
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_ref().map(|t| t.expose_secret().as_str())
    }

    pub fn has_tokens(&self) -> bool {
        self.access_token.is_some() && self.refresh_token.is_some()
    }

    /// Forgets everything: user and tokens.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.user.is_none() && self.access_token.is_none() && self.refresh_token.is_none()
    }
}

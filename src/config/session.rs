//! Web session configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Minimum length of the cookie signing key.
const MIN_SECRET_LEN: usize = 32;

/// Web session configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Key used to sign session cookies (HMAC-SHA256)
    pub secret_key: SecretString,

    /// Name of the session cookie
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// How long an idle session is kept, in days
    #[serde(default = "default_lifetime_days")]
    pub lifetime_days: u64,

    /// Backend tokens expiring sooner than this are refreshed, in seconds
    #[serde(default = "default_refresh_window")]
    pub refresh_window_secs: u64,

    /// Mark the cookie `Secure` (HTTPS only)
    #[serde(default)]
    pub secure_cookie: bool,
}

impl SessionConfig {
    /// Create a configuration with defaults around the given signing key.
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: SecretString::new(secret_key.into()),
            cookie_name: default_cookie_name(),
            lifetime_days: default_lifetime_days(),
            refresh_window_secs: default_refresh_window(),
            secure_cookie: false,
        }
    }

    /// Get the session lifetime as Duration
    pub fn lifetime(&self) -> Duration {
        Duration::from_secs(self.lifetime_days * 24 * 60 * 60)
    }

    /// Get the token refresh window as Duration
    pub fn refresh_window(&self) -> Duration {
        Duration::from_secs(self.refresh_window_secs)
    }

    /// Validate session configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.secret_key.expose_secret().len() < MIN_SECRET_LEN {
            return Err(ValidationError::SessionSecretTooShort(MIN_SECRET_LEN));
        }
        if self.lifetime_days == 0 || self.lifetime_days > 90 {
            return Err(ValidationError::InvalidSessionLifetime);
        }
        if self.cookie_name.is_empty() {
            return Err(ValidationError::MissingRequired("SESSION_COOKIE_NAME"));
        }
        Ok(())
    }
}

fn default_cookie_name() -> String {
    "campus_share_session".to_string()
}

fn default_lifetime_days() -> u64 {
    7
}

fn default_refresh_window() -> u64 {
    120
}

//! Managed backend configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Which implementation backs the auth, table and storage ports.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendProvider {
    /// Hosted Supabase project (GoTrue + PostgREST + Storage)
    #[default]
    Supabase,
    /// Process-local store, for development without a hosted project
    Memory,
}

/// Managed backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Backend implementation to use
    #[serde(default)]
    pub provider: BackendProvider,

    /// Project URL (e.g. `https://abc.supabase.co`)
    #[serde(default)]
    pub url: String,

    /// Project API key sent as `apikey` on every request
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// Storage bucket that receives resource images
    #[serde(default = "default_image_bucket")]
    pub image_bucket: String,

    /// HTTP timeout for backend calls in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl BackendConfig {
    /// Get the HTTP timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate backend configuration
    ///
    /// The memory provider needs nothing. The Supabase provider needs a URL and an
    /// API key, and in production the URL must use HTTPS.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.provider == BackendProvider::Memory {
            return Ok(());
        }
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("BACKEND_URL"));
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ValidationError::InvalidBackendUrl);
        }
        match &self.api_key {
            Some(key) if !key.expose_secret().is_empty() => {}
            _ => return Err(ValidationError::MissingRequired("BACKEND_API_KEY")),
        }
        if *environment == Environment::Production && !self.url.starts_with("https://") {
            return Err(ValidationError::BackendMustBeHttps);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            provider: BackendProvider::default(),
            url: String::new(),
            api_key: None,
            image_bucket: default_image_bucket(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_image_bucket() -> String {
    "images".to_string()
}

fn default_timeout() -> u64 {
    10
}

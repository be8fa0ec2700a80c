//! Settings for the campus-share server
//!
//! Everything is read from the process environment (plus an optional `.env`
//! file). Keys are `CAMPUS_SHARE__<SECTION>__<FIELD>`, for example
//! `CAMPUS_SHARE__SESSION__SECRET_KEY` or `CAMPUS_SHARE__BACKEND__PROVIDER=memory`.
//!
//! ```no_run
//! use campus_share::config::AppConfig;
//!
//! let config = AppConfig::load().expect("configuration");
//! config.validate().expect("valid configuration");
//! ```

mod backend;
mod error;
mod server;
mod session;

pub use backend::{BackendConfig, BackendProvider};
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use session::SessionConfig;

use serde::Deserialize;

/// Environment variable prefix for every setting.
pub const ENV_PREFIX: &str = "CAMPUS_SHARE";

/// Separator between prefix, section and field.
const ENV_SEPARATOR: &str = "__";

/// All settings, grouped by section
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub backend: BackendConfig,

    /// Has no default: the cookie signing secret must be supplied
    pub session: SessionConfig,
}

impl AppConfig {
    /// Reads `.env` if present, then the `CAMPUS_SHARE__*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env(ENV_PREFIX)
    }

    /// Reads settings from variables under `prefix`, without touching `.env`.
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        let source = config::Environment::with_prefix(prefix).separator(ENV_SEPARATOR);
        let settings = config::Config::builder().add_source(source).build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Checks each section; the backend rules depend on the environment.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.backend.validate(&self.server.environment)?;
        self.session.validate()
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

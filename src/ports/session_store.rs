//! Session store port for server-side web sessions.
//!
//! The cookie only carries a signed [`WebSessionId`]; everything else lives here.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, WebSessionId};
use crate::domain::user::WebSession;

/// Keyed storage of web sessions with expiry.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns `None` for unknown or expired sessions.
    async fn load(&self, id: &WebSessionId) -> Result<Option<WebSession>, DomainError>;

    /// Inserts or replaces; the session expires `ttl` after this call.
    async fn save(
        &self,
        id: &WebSessionId,
        session: &WebSession,
        ttl: Duration,
    ) -> Result<(), DomainError>;

    async fn remove(&self, id: &WebSessionId) -> Result<(), DomainError>;
}

//! In-memory `SessionStore`.
//!
//! Expired sessions are dropped lazily on load and swept on save.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, WebSessionId};
use crate::domain::user::WebSession;
use crate::ports::SessionStore;

#[derive(Debug, Clone)]
struct Entry {
    session: WebSession,
    expires: Instant,
}

/// Web sessions kept in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    entries: Arc<RwLock<HashMap<WebSessionId, Entry>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions.
    pub async fn live_count(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|e| e.expires > now)
            .count()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, id: &WebSessionId) -> Result<Option<WebSession>, DomainError> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        match entries.get(id) {
            Some(entry) if entry.expires > now => Ok(Some(entry.session.clone())),
            Some(_) => {
                entries.remove(id);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn save(
        &self,
        id: &WebSessionId,
        session: &WebSession,
        ttl: Duration,
    ) -> Result<(), DomainError> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, e| e.expires > now);
        entries.insert(
            *id,
            Entry {
                session: session.clone(),
                expires: now + ttl,
            },
        );
        Ok(())
    }

    async fn remove(&self, id: &WebSessionId) -> Result<(), DomainError> {
        self.entries.write().await.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn saved_session_loads_until_removed() {
        let store = MemorySessionStore::new();
        let id = WebSessionId::new();

        store
            .save(&id, &WebSession::default(), Duration::from_secs(60))
            .await
            .unwrap();
        assert!(store.load(&id).await.unwrap().is_some());

        store.remove(&id).await.unwrap();
        assert!(store.load(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn expired_session_is_not_loaded() {
        let store = MemorySessionStore::new();
        let id = WebSessionId::new();

        store.save(&id, &WebSession::default(), Duration::ZERO).await.unwrap();

        assert!(store.load(&id).await.unwrap().is_none());
        assert_eq!(store.live_count().await, 0);
    }
}

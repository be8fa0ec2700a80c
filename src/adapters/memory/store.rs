//! Process-local stand-in for the managed backend's tables and storage.
//!
//! All tables sit behind one lock, so multi-table writes (create with an initial
//! status, cascading delete) are atomic just like the database functions they
//! replace. Not shared across processes.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::foundation::{ResourceId, UserId};
use crate::domain::resource::{Resource, StatusUpdate, Upvote};
use crate::domain::user::UserProfile;

/// An uploaded object.
#[derive(Debug, Clone)]
pub(super) struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

#[derive(Debug, Default)]
pub(super) struct Tables {
    pub resources: Vec<Resource>,
    pub statuses: Vec<StatusUpdate>,
    pub upvotes: Vec<Upvote>,
    /// Rows of the legacy `replies` table; only ever purged.
    pub legacy_replies: Vec<ResourceId>,
    pub profiles: HashMap<UserId, UserProfile>,
    pub objects: HashMap<String, StoredObject>,
}

/// In-memory backend implementing every table and storage port.
///
/// Cloning shares the same tables.
///
/// # Example
///
/// ```ignore
/// let backend = MemoryBackend::new();
/// let resources: Arc<dyn ResourceRepository> = Arc::new(backend.clone());
/// let statuses: Arc<dyn StatusRepository> = Arc::new(backend.clone());
/// ```
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    pub(super) tables: Arc<RwLock<Tables>>,
    pub(super) public_base: String,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::default())),
            public_base: "memory://images".to_string(),
        }
    }

    // === Test Helpers ===

    /// Number of stored resources.
    pub async fn resource_count(&self) -> usize {
        self.tables.read().await.resources.len()
    }

    /// Number of stored status updates (all resources).
    pub async fn status_count(&self) -> usize {
        self.tables.read().await.statuses.len()
    }

    /// Number of stored upvotes (all resources).
    pub async fn upvote_count(&self) -> usize {
        self.tables.read().await.upvotes.len()
    }

    /// Content type and size of an uploaded object.
    pub async fn object(&self, key: &str) -> Option<(String, usize)> {
        self.tables
            .read()
            .await
            .objects
            .get(key)
            .map(|o| (o.content_type.clone(), o.bytes.len()))
    }
}

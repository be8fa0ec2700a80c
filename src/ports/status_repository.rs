//! Status update repository port (`tweet_replies`).
//!
//! The batched lookups take every resource id on the feed at once, so the feed
//! costs a fixed number of round trips however long it is.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ResourceId};
use crate::domain::resource::StatusUpdate;

/// Persistence for status updates and comments.
#[async_trait]
pub trait StatusRepository: Send + Sync {
    async fn append(&self, status: &StatusUpdate) -> Result<(), DomainError>;

    /// Updates on one resource, newest first.
    async fn list_for_resource(&self, id: &ResourceId) -> Result<Vec<StatusUpdate>, DomainError>;

    /// Number of updates per resource. Resources without updates may be absent.
    async fn count_by_resources(
        &self,
        ids: &[ResourceId],
    ) -> Result<HashMap<ResourceId, u64>, DomainError>;

    /// Newest update per resource. Resources without updates are absent.
    async fn latest_by_resources(
        &self,
        ids: &[ResourceId],
    ) -> Result<HashMap<ResourceId, StatusUpdate>, DomainError>;
}

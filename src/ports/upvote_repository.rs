//! Upvote repository port (`likes`).

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ResourceId, UserId};
use crate::domain::resource::Upvote;

/// Persistence for upvotes. A row's presence means the user upvoted.
#[async_trait]
pub trait UpvoteRepository: Send + Sync {
    /// The user's upvote on a resource, if any.
    async fn find(
        &self,
        resource_id: &ResourceId,
        user_id: &UserId,
    ) -> Result<Option<Upvote>, DomainError>;

    async fn insert(&self, upvote: &Upvote) -> Result<(), DomainError>;

    /// Removes the user's upvote; a no-op when there is none.
    async fn remove(&self, resource_id: &ResourceId, user_id: &UserId) -> Result<(), DomainError>;

    async fn count_for_resource(&self, resource_id: &ResourceId) -> Result<u64, DomainError>;

    /// Upvotes per resource in one query. Resources without upvotes may be absent.
    async fn count_by_resources(
        &self,
        ids: &[ResourceId],
    ) -> Result<HashMap<ResourceId, u64>, DomainError>;
}

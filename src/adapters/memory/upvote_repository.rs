//! `UpvoteRepository` over the in-memory tables.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ResourceId, UserId};
use crate::domain::resource::Upvote;
use crate::ports::UpvoteRepository;

use super::MemoryBackend;

#[async_trait]
impl UpvoteRepository for MemoryBackend {
    async fn find(
        &self,
        resource_id: &ResourceId,
        user_id: &UserId,
    ) -> Result<Option<Upvote>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .upvotes
            .iter()
            .find(|u| u.resource_id == *resource_id && u.user_id == *user_id)
            .cloned())
    }

    async fn insert(&self, upvote: &Upvote) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let exists = tables
            .upvotes
            .iter()
            .any(|u| u.resource_id == upvote.resource_id && u.user_id == upvote.user_id);
        if exists {
            return Err(DomainError::backend("duplicate upvote")
                .with_detail("resource_id", upvote.resource_id.to_string()));
        }
        tables.upvotes.push(upvote.clone());
        Ok(())
    }

    async fn remove(&self, resource_id: &ResourceId, user_id: &UserId) -> Result<(), DomainError> {
        self.tables
            .write()
            .await
            .upvotes
            .retain(|u| !(u.resource_id == *resource_id && u.user_id == *user_id));
        Ok(())
    }

    async fn count_for_resource(&self, resource_id: &ResourceId) -> Result<u64, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .upvotes
            .iter()
            .filter(|u| u.resource_id == *resource_id)
            .count() as u64)
    }

    async fn count_by_resources(
        &self,
        ids: &[ResourceId],
    ) -> Result<HashMap<ResourceId, u64>, DomainError> {
        let tables = self.tables.read().await;
        let mut counts = HashMap::new();
        for upvote in tables.upvotes.iter().filter(|u| ids.contains(&u.resource_id)) {
            *counts.entry(upvote.resource_id).or_insert(0) += 1;
        }
        Ok(counts)
    }
}

//! `ResourceRepository` over the in-memory tables.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, ResourceId, UserId};
use crate::domain::resource::{Resource, ResourceDetails, StatusUpdate};
use crate::ports::ResourceRepository;

use super::MemoryBackend;

fn newest_first(mut resources: Vec<Resource>) -> Vec<Resource> {
    resources.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    resources
}

#[async_trait]
impl ResourceRepository for MemoryBackend {
    async fn create(
        &self,
        resource: &Resource,
        initial_status: Option<&StatusUpdate>,
    ) -> Result<Resource, DomainError> {
        let mut tables = self.tables.write().await;
        if tables.resources.iter().any(|r| r.id == resource.id) {
            return Err(DomainError::backend("duplicate key value violates unique constraint")
                .with_detail("resource_id", resource.id.to_string()));
        }
        tables.resources.push(resource.clone());
        if let Some(status) = initial_status {
            tables.statuses.push(status.clone());
        }
        Ok(resource.clone())
    }

    async fn find_by_id(&self, id: &ResourceId) -> Result<Option<Resource>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.resources.iter().find(|r| r.id == *id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Resource>, DomainError> {
        let tables = self.tables.read().await;
        Ok(newest_first(tables.resources.clone()))
    }

    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Resource>, DomainError> {
        let tables = self.tables.read().await;
        let mine = tables
            .resources
            .iter()
            .filter(|r| r.author_id.as_ref() == Some(author))
            .cloned()
            .collect();
        Ok(newest_first(mine))
    }

    async fn update_details(
        &self,
        id: &ResourceId,
        details: &ResourceDetails,
    ) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let resource = tables
            .resources
            .iter_mut()
            .find(|r| r.id == *id)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::ResourceNotFound, "Resource not found")
                    .with_detail("resource_id", id.to_string())
            })?;
        resource.name = details.name.clone();
        resource.content = details.content.clone();
        resource.image_url = details.image_url.clone();
        Ok(())
    }

    async fn delete_cascade(&self, id: &ResourceId) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        tables.upvotes.retain(|u| u.resource_id != *id);
        tables.legacy_replies.retain(|r| r != id);
        tables.statuses.retain(|s| s.resource_id != *id);
        tables.resources.retain(|r| r.id != *id);
        Ok(())
    }
}

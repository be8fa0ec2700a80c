//! DeleteResourceHandler - removes a resource and everything attached to it.
//!
//! The author or faculty may delete.

use std::sync::Arc;

use crate::domain::foundation::ResourceId;
use crate::domain::user::SessionUser;
use crate::ports::ResourceRepository;

use super::ResourceError;

#[derive(Debug, Clone)]
pub struct DeleteResourceCommand {
    pub resource_id: ResourceId,
    pub user: SessionUser,
}

pub struct DeleteResourceHandler {
    resources: Arc<dyn ResourceRepository>,
}

impl DeleteResourceHandler {
    pub fn new(resources: Arc<dyn ResourceRepository>) -> Self {
        Self { resources }
    }

    pub async fn handle(&self, cmd: DeleteResourceCommand) -> Result<(), ResourceError> {
        let resource = self
            .resources
            .find_by_id(&cmd.resource_id)
            .await
            .map_err(ResourceError::Backend)?
            .ok_or(ResourceError::NotFound)?;

        if !resource.can_be_modified_by(&cmd.user) {
            tracing::warn!(
                resource_id = %cmd.resource_id,
                user_id = %cmd.user.user_id,
                "Refused resource deletion"
            );
            return Err(ResourceError::NotAuthorized);
        }

        self.resources
            .delete_cascade(&cmd.resource_id)
            .await
            .map_err(ResourceError::Backend)?;

        tracing::info!(resource_id = %cmd.resource_id, user_id = %cmd.user.user_id, "Resource deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryBackend;
    use crate::domain::foundation::{BackendUser, UserId};
    use crate::domain::resource::{Resource, StatusUpdate, Upvote};
    use crate::domain::user::Role;
    use crate::ports::{StatusRepository, UpvoteRepository};

    fn user(id: &str, role: Role) -> SessionUser {
        let mut user = SessionUser::without_profile(&BackendUser {
            id: UserId::new(id).unwrap(),
            email: format!("{id}@campus.edu"),
        });
        user.role = role;
        user
    }

    async fn seeded() -> (Arc<MemoryBackend>, Resource) {
        let backend = Arc::new(MemoryBackend::new());
        let author = UserId::new("ada").unwrap();
        let resource = Resource::new("Lab", "", "", Some(author.clone())).unwrap();
        backend.create(&resource, None).await.unwrap();
        backend
            .append(&StatusUpdate::comment(resource.id, "busy", author.clone()))
            .await
            .unwrap();
        backend.insert(&Upvote::new(resource.id, author)).await.unwrap();
        (backend, resource)
    }

    #[tokio::test]
    async fn faculty_deletes_with_cascade() {
        let (backend, resource) = seeded().await;

        DeleteResourceHandler::new(backend.clone())
            .handle(DeleteResourceCommand {
                resource_id: resource.id,
                user: user("prof", Role::Faculty),
            })
            .await
            .unwrap();

        assert_eq!(backend.resource_count().await, 0);
        assert_eq!(backend.status_count().await, 0);
        assert_eq!(backend.upvote_count().await, 0);
    }

    #[tokio::test]
    async fn stranger_is_not_authorized() {
        let (backend, resource) = seeded().await;

        let err = DeleteResourceHandler::new(backend.clone())
            .handle(DeleteResourceCommand {
                resource_id: resource.id,
                user: user("bob", Role::Admin),
            })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Not authorized");
        assert_eq!(backend.resource_count().await, 1);
    }

    #[tokio::test]
    async fn missing_resource_is_not_found() {
        let err = DeleteResourceHandler::new(Arc::new(MemoryBackend::new()))
            .handle(DeleteResourceCommand {
                resource_id: ResourceId::new(),
                user: user("ada", Role::Student),
            })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Not found");
    }
}

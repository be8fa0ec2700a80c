//! EditResourceHandler - loads a resource for editing and saves the edit.
//!
//! Only the author or faculty may edit.

use std::sync::Arc;

use crate::domain::foundation::ResourceId;
use crate::domain::resource::{Resource, ResourceDetails};
use crate::domain::user::SessionUser;
use crate::ports::ResourceRepository;

use super::ResourceError;

/// Query for a resource the user wants to edit.
#[derive(Debug, Clone)]
pub struct LoadEditableResourceQuery {
    pub resource_id: ResourceId,
    pub user: SessionUser,
}

/// Command to overwrite a resource's editable fields.
#[derive(Debug, Clone)]
pub struct UpdateResourceCommand {
    pub resource_id: ResourceId,
    pub user: SessionUser,
    pub details: ResourceDetails,
}

pub struct EditResourceHandler {
    resources: Arc<dyn ResourceRepository>,
}

impl EditResourceHandler {
    pub fn new(resources: Arc<dyn ResourceRepository>) -> Self {
        Self { resources }
    }

    /// Returns the resource if it exists and the user may modify it.
    pub async fn load(&self, query: LoadEditableResourceQuery) -> Result<Resource, ResourceError> {
        let resource = self
            .resources
            .find_by_id(&query.resource_id)
            .await
            .map_err(ResourceError::Backend)?
            .ok_or(ResourceError::NotFound)?;
        if !resource.can_be_modified_by(&query.user) {
            return Err(ResourceError::NotAuthorized);
        }
        Ok(resource)
    }

    pub async fn update(&self, cmd: UpdateResourceCommand) -> Result<(), ResourceError> {
        self.load(LoadEditableResourceQuery {
            resource_id: cmd.resource_id,
            user: cmd.user.clone(),
        })
        .await?;

        cmd.details.validate().map_err(|_| ResourceError::EmptyName)?;

        self.resources
            .update_details(&cmd.resource_id, &cmd.details)
            .await
            .map_err(|e| {
                tracing::error!(resource_id = %cmd.resource_id, error = %e, "Resource update failed");
                ResourceError::UpdateFailed(e)
            })?;

        tracing::info!(resource_id = %cmd.resource_id, user_id = %cmd.user.user_id, "Resource edited");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryBackend;
    use crate::domain::foundation::{BackendUser, UserId};
    use crate::domain::user::Role;

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
        let resource = Resource::new("Lab", "", "", Some(UserId::new("ada").unwrap())).unwrap();
        backend.create(&resource, None).await.unwrap();
        (backend, resource)
    }

    fn details(name: &str) -> ResourceDetails {
        ResourceDetails {
            name: name.into(),
            content: "now with snacks".into(),
            image_url: String::new(),
        }
    }

    #[tokio::test]
    async fn author_can_edit() {
        let (backend, resource) = seeded().await;
        let handler = EditResourceHandler::new(backend.clone());

        handler
            .update(UpdateResourceCommand {
                resource_id: resource.id,
                user: user("ada", Role::Student),
                details: details("Lab 2"),
            })
            .await
            .unwrap();

        let stored = backend.find_by_id(&resource.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Lab 2");
        assert_eq!(stored.content, "now with snacks");
    }

    #[tokio::test]
    async fn faculty_can_edit_others() {
        let (backend, resource) = seeded().await;
        let handler = EditResourceHandler::new(backend);

        let loaded = handler
            .load(LoadEditableResourceQuery {
                resource_id: resource.id,
                user: user("prof", Role::Faculty),
            })
            .await;
        assert!(loaded.is_ok());
    }

    #[tokio::test]
    async fn other_students_are_refused() {
        let (backend, resource) = seeded().await;
        let handler = EditResourceHandler::new(backend);

        let err = handler
            .update(UpdateResourceCommand {
                resource_id: resource.id,
                user: user("bob", Role::Student),
                details: details("Mine now"),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ResourceError::NotAuthorized));
    }

    #[tokio::test]
    async fn blank_name_is_rejected_after_authorization() {
        let (backend, resource) = seeded().await;
        let handler = EditResourceHandler::new(backend);

        let err = handler
            .update(UpdateResourceCommand {
                resource_id: resource.id,
                user: user("ada", Role::Student),
                details: details("  "),
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Resource name cannot be empty");
    }

    #[tokio::test]
    async fn missing_resource_is_not_found() {
        let handler = EditResourceHandler::new(Arc::new(MemoryBackend::new()));

        let err = handler
            .load(LoadEditableResourceQuery {
                resource_id: ResourceId::new(),
                user: user("ada", Role::Faculty),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ResourceError::NotFound));
    }
}

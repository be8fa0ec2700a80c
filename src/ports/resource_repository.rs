//! Resource repository port.
//!
//! Writes that touch several tables (`create` with an initial status,
//! `delete_cascade`) are atomic: either every row is written or none.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ResourceId, UserId};
use crate::domain::resource::{Resource, ResourceDetails, StatusUpdate};

/// Persistence for resources (`tweets`).
#[async_trait]
pub trait ResourceRepository: Send + Sync {
    /// Stores a resource together with an optional first status update.
    ///
    /// Returns the stored resource as the backend echoed it.
    async fn create(
        &self,
        resource: &Resource,
        initial_status: Option<&StatusUpdate>,
    ) -> Result<Resource, DomainError>;

    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &ResourceId) -> Result<Option<Resource>, DomainError>;

    /// All resources, newest first.
    async fn list_all(&self) -> Result<Vec<Resource>, DomainError>;

    /// Resources authored by `author`, newest first.
    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Resource>, DomainError>;

    /// Overwrites name, content and image URL.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the resource doesn't exist
    async fn update_details(
        &self,
        id: &ResourceId,
        details: &ResourceDetails,
    ) -> Result<(), DomainError>;

    /// Removes the resource with its upvotes, legacy replies and status updates.
    async fn delete_cascade(&self, id: &ResourceId) -> Result<(), DomainError>;
}

//! Resource command and query handlers: create, edit, delete.

mod create_resource;
mod delete_resource;
mod edit_resource;

pub use create_resource::{CreateResourceCommand, CreateResourceHandler, ImageUpload};
pub use delete_resource::{DeleteResourceCommand, DeleteResourceHandler};
pub use edit_resource::{
    EditResourceHandler, LoadEditableResourceQuery, UpdateResourceCommand,
};

use thiserror::Error;

use crate::domain::foundation::DomainError;

/// Errors surfaced by resource handlers, worded as the user sees them.
#[derive(Debug, Clone, Error)]
pub enum ResourceError {
    #[error("Resource name/title cannot be empty")]
    EmptyTitle,

    #[error("Resource name cannot be empty")]
    EmptyName,

    #[error("Not found")]
    NotFound,

    #[error("Not authorized")]
    NotAuthorized,

    #[error("Failed to create resource")]
    CreateFailed(#[source] DomainError),

    #[error("Failed to update resource")]
    UpdateFailed(#[source] DomainError),

    /// Lookup or delete failed in the backend; carries the backend's message.
    #[error("{}", .0.message)]
    Backend(#[source] DomainError),
}

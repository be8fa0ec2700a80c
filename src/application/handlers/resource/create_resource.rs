//! CreateResourceHandler - Command handler for posting a new resource.
//!
//! An attached image is uploaded first (to `posts/<uuid><ext>`); if that fails the
//! resource is still created, just without the picture. The resource and its
//! optional first status update are then written in one atomic call.

use std::path::Path;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::foundation::UserId;
use crate::domain::resource::{Resource, StatusFields, StatusUpdate};
use crate::ports::{ImageStorage, ResourceRepository};

use super::ResourceError;

const DEFAULT_IMAGE_EXTENSION: &str = ".jpg";
const DEFAULT_IMAGE_CONTENT_TYPE: &str = "image/jpeg";

/// An image file submitted with the form.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Storage key: `posts/<uuid><ext>`, extension lower-cased, `.jpg` if absent.
    pub fn storage_key(&self) -> String {
        let ext = Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
            .map(|ext| format!(".{}", ext.to_lowercase()))
            .unwrap_or_else(|| DEFAULT_IMAGE_EXTENSION.to_string());
        format!("posts/{}{}", Uuid::new_v4(), ext)
    }

    pub fn content_type(&self) -> &str {
        self.content_type
            .as_deref()
            .filter(|ct| !ct.is_empty())
            .unwrap_or(DEFAULT_IMAGE_CONTENT_TYPE)
    }
}

/// Command to create a resource.
#[derive(Debug, Clone)]
pub struct CreateResourceCommand {
    pub author: UserId,
    pub name: String,
    pub content: String,
    pub image_url: String,
    pub image: Option<ImageUpload>,
    /// Crowd, importance and queue; the status message is taken from `content`.
    pub status: StatusFields,
    /// The author's backend token, used for the upload.
    pub access_token: Option<String>,
}

/// Handler for creating resources.
pub struct CreateResourceHandler {
    resources: Arc<dyn ResourceRepository>,
    images: Arc<dyn ImageStorage>,
}

impl CreateResourceHandler {
    pub fn new(resources: Arc<dyn ResourceRepository>, images: Arc<dyn ImageStorage>) -> Self {
        Self { resources, images }
    }

    pub async fn handle(&self, cmd: CreateResourceCommand) -> Result<Resource, ResourceError> {
        if cmd.name.trim().is_empty() {
            return Err(ResourceError::EmptyTitle);
        }

        let mut image_url = cmd.image_url.clone();
        if let Some(image) = cmd.image.filter(|i| !i.file_name.is_empty()) {
            let key = image.storage_key();
            let content_type = image.content_type().to_string();
            match self
                .images
                .upload(&key, image.bytes, &content_type, cmd.access_token.as_deref())
                .await
            {
                Ok(url) => image_url = url,
                Err(e) => tracing::warn!(key = %key, error = %e, "Image upload failed; continuing without image"),
            }
        }

        let resource = Resource::new(&cmd.name, &cmd.content, &image_url, Some(cmd.author.clone()))
            .map_err(|_| ResourceError::EmptyTitle)?;

        let initial_status = cmd.status.has_attributes().then(|| {
            StatusUpdate::new(
                resource.id,
                StatusFields {
                    status_message: resource.content.clone(),
                    ..cmd.status
                },
                Some(cmd.author),
            )
        });

        let created = self
            .resources
            .create(&resource, initial_status.as_ref())
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Resource creation failed");
                ResourceError::CreateFailed(e)
            })?;

        tracing::info!(resource_id = %created.id, with_status = initial_status.is_some(), "Resource created");
        Ok(created)
    }
}

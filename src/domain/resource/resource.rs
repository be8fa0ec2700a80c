//! The shared resource record.

use crate::domain::foundation::{
    OwnedByUser, ResourceId, Timestamp, UserId, ValidationError,
};

/// Fallback title when a resource has neither name nor content.
const UNTITLED: &str = "Untitled Resource";

/// A shareable campus resource (row of the `tweets` table).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub id: ResourceId,
    pub name: String,
    pub content: String,
    pub image_url: String,
    pub author_id: Option<UserId>,
    pub created_at: Timestamp,
}

impl Resource {
    /// Creates a new resource authored by `author`.
    ///
    /// Name, content and image URL are trimmed; a blank name is rejected.
    pub fn new(
        name: &str,
        content: &str,
        image_url: &str,
        author: Option<UserId>,
    ) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        Ok(Self {
            id: ResourceId::new(),
            name: name.to_string(),
            content: content.trim().to_string(),
            image_url: image_url.trim().to_string(),
            author_id: author,
            created_at: Timestamp::now(),
        })
    }

    /// Title shown in listings: name, else content, else a placeholder.
    pub fn display_name(&self) -> &str {
        if !self.name.is_empty() {
            &self.name
        } else if !self.content.is_empty() {
            &self.content
        } else {
            UNTITLED
        }
    }

    /// Editable fields of this resource.
    pub fn details(&self) -> ResourceDetails {
        ResourceDetails {
            name: self.name.clone(),
            content: self.content.clone(),
            image_url: self.image_url.clone(),
        }
    }
}

impl OwnedByUser for Resource {
    fn owner_id(&self) -> Option<&UserId> {
        self.author_id.as_ref()
    }
}

/// Editable fields of a resource, as submitted by the edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceDetails {
    pub name: String,
    pub content: String,
    pub image_url: String,
}

impl ResourceDetails {
    /// Rejects a blank name; other fields are stored as submitted.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        Ok(())
    }
}

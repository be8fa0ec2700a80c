//! ListCommentsHandler - Query handler for a resource's comment page.
//!
//! The resource header and the comment list are fetched independently; either
//! may come back empty without failing the page.

use std::sync::Arc;

use crate::domain::foundation::ResourceId;
use crate::domain::resource::{Resource, StatusUpdate};
use crate::ports::{ResourceRepository, StatusRepository};

#[derive(Debug, Clone)]
pub struct ListCommentsQuery {
    pub resource_id: ResourceId,
}

/// A resource (if it still exists) and its updates, newest first.
#[derive(Debug, Clone, Default)]
pub struct CommentsView {
    pub resource: Option<Resource>,
    pub comments: Vec<StatusUpdate>,
}

pub struct ListCommentsHandler {
    resources: Arc<dyn ResourceRepository>,
    statuses: Arc<dyn StatusRepository>,
}

impl ListCommentsHandler {
    pub fn new(resources: Arc<dyn ResourceRepository>, statuses: Arc<dyn StatusRepository>) -> Self {
        Self {
            resources,
            statuses,
        }
    }

    pub async fn handle(&self, query: ListCommentsQuery) -> CommentsView {
        let (comments, resource) = futures::join!(
            self.statuses.list_for_resource(&query.resource_id),
            self.resources.find_by_id(&query.resource_id),
        );

        let comments = comments.unwrap_or_else(|e| {
            tracing::warn!(resource_id = %query.resource_id, error = %e, "Fetch comments failed");
            Vec::new()
        });
        let resource = resource.unwrap_or_else(|e| {
            tracing::warn!(resource_id = %query.resource_id, error = %e, "Fetch resource for comments failed");
            None
        });

        CommentsView { resource, comments }
    }
}

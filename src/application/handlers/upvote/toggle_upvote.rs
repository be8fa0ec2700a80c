//! ToggleUpvoteHandler - upvotes a resource, or withdraws an existing upvote.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, ResourceId, UserId};
use crate::domain::resource::{Upvote, UpvoteAction};
use crate::ports::{ResourceRepository, UpvoteRepository};

#[derive(Debug, Clone)]
pub struct ToggleUpvoteCommand {
    pub resource_id: ResourceId,
    pub user_id: UserId,
}

/// What the toggle did and the resource's new upvote total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleUpvoteResult {
    pub action: UpvoteAction,
    pub upvotes_count: u64,
}

pub struct ToggleUpvoteHandler {
    resources: Arc<dyn ResourceRepository>,
    upvotes: Arc<dyn UpvoteRepository>,
}

impl ToggleUpvoteHandler {
    pub fn new(resources: Arc<dyn ResourceRepository>, upvotes: Arc<dyn UpvoteRepository>) -> Self {
        Self { resources, upvotes }
    }

    pub async fn handle(&self, cmd: ToggleUpvoteCommand) -> Result<ToggleUpvoteResult, DomainError> {
        if self.resources.find_by_id(&cmd.resource_id).await?.is_none() {
            return Err(DomainError::new(ErrorCode::ResourceNotFound, "Resource not found")
                .with_detail("resource_id", cmd.resource_id.to_string()));
        }

        let action = match self.upvotes.find(&cmd.resource_id, &cmd.user_id).await? {
            Some(_) => {
                self.upvotes.remove(&cmd.resource_id, &cmd.user_id).await?;
                UpvoteAction::Unupvoted
            }
            None => {
                self.upvotes
                    .insert(&Upvote::new(cmd.resource_id, cmd.user_id.clone()))
                    .await?;
                UpvoteAction::Upvoted
            }
        };

        let upvotes_count = self.upvotes.count_for_resource(&cmd.resource_id).await?;
        tracing::debug!(resource_id = %cmd.resource_id, %action, upvotes_count, "Upvote toggled");
        Ok(ToggleUpvoteResult {
            action,
            upvotes_count,
        })
    }
}

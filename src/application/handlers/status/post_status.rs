//! PostStatusHandler - appends a status update to a resource.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ResourceId, UserId};
use crate::domain::resource::{StatusFields, StatusUpdate};
use crate::ports::StatusRepository;

#[derive(Debug, Clone)]
pub struct PostStatusCommand {
    pub resource_id: ResourceId,
    pub user_id: UserId,
    pub fields: StatusFields,
}

pub struct PostStatusHandler {
    statuses: Arc<dyn StatusRepository>,
}

impl PostStatusHandler {
    pub fn new(statuses: Arc<dyn StatusRepository>) -> Self {
        Self { statuses }
    }

    pub async fn handle(&self, cmd: PostStatusCommand) -> Result<StatusUpdate, DomainError> {
        let status = StatusUpdate::new(cmd.resource_id, cmd.fields, Some(cmd.user_id));
        self.statuses.append(&status).await?;
        tracing::debug!(resource_id = %status.resource_id, "Status update posted");
        Ok(status)
    }
}

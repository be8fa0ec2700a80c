//! AddCommentHandler - comments are status updates carrying only a message.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ResourceId, UserId};
use crate::domain::resource::StatusUpdate;
use crate::ports::StatusRepository;

#[derive(Debug, Clone)]
pub struct AddCommentCommand {
    pub resource_id: ResourceId,
    pub user_id: UserId,
    pub text: String,
}

pub struct AddCommentHandler {
    statuses: Arc<dyn StatusRepository>,
}

impl AddCommentHandler {
    pub fn new(statuses: Arc<dyn StatusRepository>) -> Self {
        Self { statuses }
    }

    /// Stores the trimmed comment; blank comments are ignored (`Ok(None)`).
    pub async fn handle(&self, cmd: AddCommentCommand) -> Result<Option<StatusUpdate>, DomainError> {
        let text = cmd.text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        let comment = StatusUpdate::comment(cmd.resource_id, text, cmd.user_id);
        self.statuses.append(&comment).await?;
        Ok(Some(comment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryBackend;

    fn command(text: &str) -> AddCommentCommand {
        AddCommentCommand {
            resource_id: ResourceId::new(),
            user_id: UserId::new("ada").unwrap(),
            text: text.into(),
        }
    }

    #[tokio::test]
    async fn stores_trimmed_comment() {
        let backend = Arc::new(MemoryBackend::new());
        let stored = AddCommentHandler::new(backend.clone())
            .handle(command("  great spot  "))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(stored.status_message, "great spot");
        assert_eq!(backend.status_count().await, 1);
    }

    #[tokio::test]
    async fn blank_comment_is_ignored() {
        let backend = Arc::new(MemoryBackend::new());
        let stored = AddCommentHandler::new(backend.clone())
            .handle(command("   "))
            .await
            .unwrap();

        assert!(stored.is_none());
        assert_eq!(backend.status_count().await, 0);
    }
}

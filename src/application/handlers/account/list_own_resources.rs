//! ListOwnResourcesHandler - Query handler for the profile page.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::resource::Resource;
use crate::ports::ResourceRepository;

/// Query for the resources a user authored.
#[derive(Debug, Clone)]
pub struct ListOwnResourcesQuery {
    pub user_id: UserId,
}

pub struct ListOwnResourcesHandler {
    resources: Arc<dyn ResourceRepository>,
}

impl ListOwnResourcesHandler {
    pub fn new(resources: Arc<dyn ResourceRepository>) -> Self {
        Self { resources }
    }

    /// Resources authored by the user, newest first.
    pub async fn handle(&self, query: ListOwnResourcesQuery) -> Result<Vec<Resource>, DomainError> {
        self.resources.list_by_author(&query.user_id).await
    }
}

//! PostgREST implementation of `UpvoteRepository` (`likes`).

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ResourceId, UserId};
use crate::domain::resource::Upvote;
use crate::ports::UpvoteRepository;

use super::client::eq;
use super::rows::{IdsArg, UpvoteRow};
use super::SupabaseClient;

const TABLE: &str = "likes";
const COUNTS_FN: &str = "upvote_counts";

/// `UpvoteRepository` backed by Supabase tables.
#[derive(Debug, Clone)]
pub struct SupabaseUpvoteRepository {
    client: SupabaseClient,
}

impl SupabaseUpvoteRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UpvoteRepository for SupabaseUpvoteRepository {
    async fn find(
        &self,
        resource_id: &ResourceId,
        user_id: &UserId,
    ) -> Result<Option<Upvote>, DomainError> {
        let rows: Vec<UpvoteRow> = self
            .client
            .select(
                TABLE,
                &[
                    ("select", "*".into()),
                    ("resource_id", eq(resource_id)),
                    ("user_id", eq(user_id)),
                    ("limit", "1".into()),
                ],
            )
            .await?;
        rows.into_iter().next().map(Upvote::try_from).transpose()
    }

    async fn insert(&self, upvote: &Upvote) -> Result<(), DomainError> {
        let _: Vec<UpvoteRow> = self.client.insert(TABLE, &UpvoteRow::from(upvote)).await?;
        Ok(())
    }

    async fn remove(&self, resource_id: &ResourceId, user_id: &UserId) -> Result<(), DomainError> {
        self.client
            .delete(
                TABLE,
                &[("resource_id", eq(resource_id)), ("user_id", eq(user_id))],
            )
            .await
    }

    async fn count_for_resource(&self, resource_id: &ResourceId) -> Result<u64, DomainError> {
        let counts = self.count_by_resources(std::slice::from_ref(resource_id)).await?;
        Ok(counts.get(resource_id).copied().unwrap_or(0))
    }

    async fn count_by_resources(
        &self,
        ids: &[ResourceId],
    ) -> Result<HashMap<ResourceId, u64>, DomainError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        self.client.rpc(COUNTS_FN, &IdsArg { ids }).await
    }
}

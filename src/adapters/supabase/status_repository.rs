//! PostgREST implementation of `StatusRepository` (`tweet_replies`).

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ResourceId};
use crate::domain::resource::StatusUpdate;
use crate::ports::StatusRepository;

use super::client::eq;
use super::rows::{IdsArg, StatusRow};
use super::SupabaseClient;

const TABLE: &str = "tweet_replies";
const COUNTS_FN: &str = "status_counts";
const LATEST_FN: &str = "latest_statuses";

/// `StatusRepository` backed by Supabase tables.
#[derive(Debug, Clone)]
pub struct SupabaseStatusRepository {
    client: SupabaseClient,
}

impl SupabaseStatusRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StatusRepository for SupabaseStatusRepository {
    async fn append(&self, status: &StatusUpdate) -> Result<(), DomainError> {
        let _: Vec<StatusRow> = self.client.insert(TABLE, &StatusRow::from(status)).await?;
        Ok(())
    }

    async fn list_for_resource(&self, id: &ResourceId) -> Result<Vec<StatusUpdate>, DomainError> {
        let rows: Vec<StatusRow> = self
            .client
            .select(
                TABLE,
                &[
                    ("select", "*".into()),
                    ("resource_id", eq(id)),
                    ("order", "created_at.desc".into()),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(StatusUpdate::from).collect())
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

    async fn latest_by_resources(
        &self,
        ids: &[ResourceId],
    ) -> Result<HashMap<ResourceId, StatusUpdate>, DomainError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows: Vec<StatusRow> = self.client.rpc(LATEST_FN, &IdsArg { ids }).await?;
        Ok(rows
            .into_iter()
            .map(|row| (row.resource_id, StatusUpdate::from(row)))
            .collect())
    }
}

//! PostgREST implementation of `ResourceRepository` (`tweets`).
//!
//! Multi-table writes go through the `create_resource_with_status` and
//! `delete_resource_cascade` database functions so they commit atomically.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode, ResourceId, UserId};
use crate::domain::resource::{Resource, ResourceDetails, StatusUpdate};
use crate::ports::ResourceRepository;

use super::client::eq;
use super::rows::{ResourceRow, StatusRow};
use super::SupabaseClient;

const TABLE: &str = "tweets";

#[derive(Debug, Serialize)]
struct CreateArgs {
    resource: ResourceRow,
    initial_status: Option<StatusRow>,
}

#[derive(Debug, Serialize)]
struct DeleteArgs {
    target_id: ResourceId,
}

#[derive(Debug, Serialize)]
struct DetailsPatch<'a> {
    name: &'a str,
    content: &'a str,
    image_url: &'a str,
}

/// `ResourceRepository` backed by Supabase tables.
#[derive(Debug, Clone)]
pub struct SupabaseResourceRepository {
    client: SupabaseClient,
}

impl SupabaseResourceRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceRepository for SupabaseResourceRepository {
    async fn create(
        &self,
        resource: &Resource,
        initial_status: Option<&StatusUpdate>,
    ) -> Result<Resource, DomainError> {
        let args = CreateArgs {
            resource: ResourceRow::from(resource),
            initial_status: initial_status.map(StatusRow::from),
        };
        let row: ResourceRow = self.client.rpc("create_resource_with_status", &args).await?;
        Ok(row.into())
    }

    async fn find_by_id(&self, id: &ResourceId) -> Result<Option<Resource>, DomainError> {
        let rows: Vec<ResourceRow> = self
            .client
            .select(
                TABLE,
                &[("select", "*".into()), ("id", eq(id)), ("limit", "1".into())],
            )
            .await?;
        Ok(rows.into_iter().next().map(Resource::from))
    }

    async fn list_all(&self) -> Result<Vec<Resource>, DomainError> {
        let rows: Vec<ResourceRow> = self
            .client
            .select(
                TABLE,
                &[("select", "*".into()), ("order", "created_at.desc".into())],
            )
            .await?;
        Ok(rows.into_iter().map(Resource::from).collect())
    }

    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Resource>, DomainError> {
        let rows: Vec<ResourceRow> = self
            .client
            .select(
                TABLE,
                &[
                    ("select", "*".into()),
                    ("author_id", eq(author)),
                    ("order", "created_at.desc".into()),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(Resource::from).collect())
    }

    async fn update_details(
        &self,
        id: &ResourceId,
        details: &ResourceDetails,
    ) -> Result<(), DomainError> {
        let patch = DetailsPatch {
            name: &details.name,
            content: &details.content,
            image_url: &details.image_url,
        };
        let updated: Vec<ResourceRow> = self.client.update(TABLE, &[("id", eq(id))], &patch).await?;
        if updated.is_empty() {
            return Err(DomainError::new(ErrorCode::ResourceNotFound, "Resource not found")
                .with_detail("resource_id", id.to_string()));
        }
        Ok(())
    }

    async fn delete_cascade(&self, id: &ResourceId) -> Result<(), DomainError> {
        self.client
            .rpc_void("delete_resource_cascade", &DeleteArgs { target_id: *id })
            .await
    }
}

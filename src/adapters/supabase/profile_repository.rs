//! PostgREST implementation of `ProfileRepository` (`user_profiles`).

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::UserProfile;
use crate::ports::ProfileRepository;

use super::client::eq;
use super::rows::{IdsArg, ProfileRow};
use super::SupabaseClient;

const TABLE: &str = "user_profiles";
const NAMES_FN: &str = "author_names";

/// `ProfileRepository` backed by Supabase tables.
#[derive(Debug, Clone)]
pub struct SupabaseProfileRepository {
    client: SupabaseClient,
}

impl SupabaseProfileRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProfileRepository for SupabaseProfileRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<UserProfile>, DomainError> {
        let rows: Vec<ProfileRow> = self
            .client
            .select(
                TABLE,
                &[("select", "*".into()), ("user_id", eq(user_id)), ("limit", "1".into())],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn create(&self, profile: &UserProfile) -> Result<(), DomainError> {
        let inserted: Vec<ProfileRow> = self.client.insert(TABLE, profile).await?;
        if inserted.is_empty() {
            return Err(DomainError::new(
                ErrorCode::BackendError,
                "Profile insert returned no rows",
            ));
        }
        Ok(())
    }

    async fn display_names(
        &self,
        user_ids: &[UserId],
    ) -> Result<HashMap<UserId, String>, DomainError> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }
        self.client.rpc(NAMES_FN, &IdsArg { ids: user_ids }).await
    }
}

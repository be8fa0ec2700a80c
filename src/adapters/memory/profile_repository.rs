//! `ProfileRepository` over the in-memory tables.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::UserProfile;
use crate::ports::ProfileRepository;

use super::MemoryBackend;

#[async_trait]
impl ProfileRepository for MemoryBackend {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<UserProfile>, DomainError> {
        Ok(self.tables.read().await.profiles.get(user_id).cloned())
    }

    async fn create(&self, profile: &UserProfile) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if tables.profiles.contains_key(&profile.user_id) {
            return Err(DomainError::backend("profile already exists")
                .with_detail("user_id", profile.user_id.to_string()));
        }
        tables.profiles.insert(profile.user_id.clone(), profile.clone());
        Ok(())
    }

    async fn display_names(
        &self,
        user_ids: &[UserId],
    ) -> Result<HashMap<UserId, String>, DomainError> {
        let tables = self.tables.read().await;
        Ok(user_ids
            .iter()
            .filter_map(|id| {
                tables
                    .profiles
                    .get(id)
                    .map(|p| (id.clone(), p.full_name.clone()))
            })
            .collect())
    }
}

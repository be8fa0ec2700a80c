//! Profile repository port (`user_profiles`).

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::UserProfile;

/// Persistence for campus profiles.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Returns `None` when the account has no profile row.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<UserProfile>, DomainError>;

    async fn create(&self, profile: &UserProfile) -> Result<(), DomainError>;

    /// `full_name` per user in one query. Users without a profile are absent.
    async fn display_names(
        &self,
        user_ids: &[UserId],
    ) -> Result<HashMap<UserId, String>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ProfileRepository) {}
    }
}

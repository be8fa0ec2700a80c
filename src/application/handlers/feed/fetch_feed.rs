//! FetchFeedHandler - Query handler for the ranked resource feed.
//!
//! One query per concern rather than per resource:
//!
//! 1. every resource, newest first
//! 2. upvote counts for all ids
//! 3. status-update counts for all ids
//! 4. latest status for all ids
//! 5. author names for all distinct authors
//!
//! Steps 2-5 run concurrently and each degrades on its own (zero counts, no
//! status, default author). Only a failure of step 1 empties the feed.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::domain::foundation::{DomainError, ResourceId, UserId};
use crate::domain::resource::{rank_feed, FeedEntry};
use crate::domain::user::SessionUser;
use crate::ports::{ProfileRepository, ResourceRepository, StatusRepository, UpvoteRepository};

/// Query for the feed as seen by `viewer`.
#[derive(Debug, Clone, Default)]
pub struct FetchFeedQuery {
    pub viewer: Option<SessionUser>,
}

/// Handler assembling and ranking the feed.
pub struct FetchFeedHandler {
    resources: Arc<dyn ResourceRepository>,
    upvotes: Arc<dyn UpvoteRepository>,
    statuses: Arc<dyn StatusRepository>,
    profiles: Arc<dyn ProfileRepository>,
}

impl FetchFeedHandler {
    pub fn new(
        resources: Arc<dyn ResourceRepository>,
        upvotes: Arc<dyn UpvoteRepository>,
        statuses: Arc<dyn StatusRepository>,
        profiles: Arc<dyn ProfileRepository>,
    ) -> Self {
        Self {
            resources,
            upvotes,
            statuses,
            profiles,
        }
    }

    pub async fn handle(&self, query: FetchFeedQuery) -> Vec<FeedEntry> {
        let resources = match self.resources.list_all().await {
            Ok(resources) => resources,
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch resources for feed");
                return Vec::new();
            }
        };
        if resources.is_empty() {
            return Vec::new();
        }

        let ids: Vec<ResourceId> = resources.iter().map(|r| r.id).collect();
        let authors: Vec<UserId> = resources
            .iter()
            .filter_map(|r| r.author_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let (upvotes, comments, latest, names) = futures::join!(
            self.upvotes.count_by_resources(&ids),
            self.statuses.count_by_resources(&ids),
            self.statuses.latest_by_resources(&ids),
            self.profiles.display_names(&authors),
        );
        let upvotes = degrade(upvotes, "upvote counts");
        let comments = degrade(comments, "comment counts");
        let mut latest = degrade(latest, "latest statuses");
        let names = degrade(names, "author names");

        let mut feed: Vec<FeedEntry> = resources
            .into_iter()
            .map(|resource| {
                let author_name = resource
                    .author_id
                    .as_ref()
                    .and_then(|id| names.get(id).cloned());
                let id = resource.id;
                FeedEntry::new(
                    resource,
                    upvotes.get(&id).copied().unwrap_or(0),
                    comments.get(&id).copied().unwrap_or(0),
                    latest.remove(&id),
                    author_name,
                    query.viewer.as_ref(),
                )
            })
            .collect();

        rank_feed(&mut feed);
        feed
    }
}

/// Falls back to an empty map, logging the failed lookup.
fn degrade<K, V>(result: Result<HashMap<K, V>, DomainError>, what: &str) -> HashMap<K, V> {
    result.unwrap_or_else(|e| {
        tracing::warn!(error = %e, lookup = what, "Feed lookup failed; using defaults");
        HashMap::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryBackend;
    use crate::domain::foundation::{BackendUser, ErrorCode, Timestamp};
    use crate::domain::resource::{Resource, StatusFields, StatusUpdate, Upvote};
    use crate::domain::user::{Role, UserProfile};
    use async_trait::async_trait;

    struct FailingLookups;

    fn offline() -> DomainError {
        DomainError::new(ErrorCode::BackendError, "offline")
    }

    #[async_trait]
    impl UpvoteRepository for FailingLookups {
        async fn find(&self, _: &ResourceId, _: &UserId) -> Result<Option<Upvote>, DomainError> {
            Err(offline())
        }
        async fn insert(&self, _: &Upvote) -> Result<(), DomainError> {
            Err(offline())
        }
        async fn remove(&self, _: &ResourceId, _: &UserId) -> Result<(), DomainError> {
            Err(offline())
        }
        async fn count_for_resource(&self, _: &ResourceId) -> Result<u64, DomainError> {
            Err(offline())
        }
        async fn count_by_resources(
            &self,
            _: &[ResourceId],
        ) -> Result<HashMap<ResourceId, u64>, DomainError> {
            Err(offline())
        }
    }

    #[async_trait]
    impl StatusRepository for FailingLookups {
        async fn append(&self, _: &StatusUpdate) -> Result<(), DomainError> {
            Err(offline())
        }
        async fn list_for_resource(&self, _: &ResourceId) -> Result<Vec<StatusUpdate>, DomainError> {
            Err(offline())
        }
        async fn count_by_resources(
            &self,
            _: &[ResourceId],
        ) -> Result<HashMap<ResourceId, u64>, DomainError> {
            Err(offline())
        }
        async fn latest_by_resources(
            &self,
            _: &[ResourceId],
        ) -> Result<HashMap<ResourceId, StatusUpdate>, DomainError> {
            Err(offline())
        }
    }

    #[async_trait]
    impl ProfileRepository for FailingLookups {
        async fn find_by_user(&self, _: &UserId) -> Result<Option<UserProfile>, DomainError> {
            Err(offline())
        }
        async fn create(&self, _: &UserProfile) -> Result<(), DomainError> {
            Err(offline())
        }
        async fn display_names(
            &self,
            _: &[UserId],
        ) -> Result<HashMap<UserId, String>, DomainError> {
            Err(offline())
        }
    }

    #[async_trait]
    impl ResourceRepository for FailingLookups {
        async fn create(
            &self,
            _: &Resource,
            _: Option<&StatusUpdate>,
        ) -> Result<Resource, DomainError> {
            Err(offline())
        }
        async fn find_by_id(&self, _: &ResourceId) -> Result<Option<Resource>, DomainError> {
            Err(offline())
        }
        async fn list_all(&self) -> Result<Vec<Resource>, DomainError> {
            Err(offline())
        }
        async fn list_by_author(&self, _: &UserId) -> Result<Vec<Resource>, DomainError> {
            Err(offline())
        }
        async fn update_details(
            &self,
            _: &ResourceId,
            _: &crate::domain::resource::ResourceDetails,
        ) -> Result<(), DomainError> {
            Err(offline())
        }
        async fn delete_cascade(&self, _: &ResourceId) -> Result<(), DomainError> {
            Err(offline())
        }
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn handler(backend: &MemoryBackend) -> FetchFeedHandler {
        let backend = Arc::new(backend.clone());
        FetchFeedHandler::new(backend.clone(), backend.clone(), backend.clone(), backend)
    }

    async fn seed(backend: &MemoryBackend, name: &str, author: &str, secs: i64) -> Resource {
        let mut resource = Resource::new(name, "", "", Some(user(author))).unwrap();
        resource.created_at = Timestamp::from_unix_secs(secs).unwrap();
        ResourceRepository::create(backend, &resource, None).await.unwrap();
        resource
    }

    async fn add_status(backend: &MemoryBackend, resource: &Resource, importance: &str, secs: i64) {
        let mut status = StatusUpdate::new(
            resource.id,
            StatusFields {
                importance: importance.to_string(),
                ..Default::default()
            },
            None,
        );
        status.created_at = Timestamp::from_unix_secs(secs).unwrap();
        backend.append(&status).await.unwrap();
    }

    #[tokio::test]
    async fn feed_joins_counts_status_and_author() {
        let backend = MemoryBackend::new();
        let gym = seed(&backend, "Gym", "ada", 100).await;
        add_status(&backend, &gym, "low", 110).await;
        add_status(&backend, &gym, "High", 120).await;
        backend.insert(&Upvote::new(gym.id, user("bob"))).await.unwrap();
        ProfileRepository::create(
            &backend,
            &UserProfile {
                user_id: user("ada"),
                email: "ada@campus.edu".into(),
                role: Role::Student,
                full_name: "Ada Lovelace".into(),
                student_id: None,
                faculty_id: None,
                department: None,
            },
        )
        .await
        .unwrap();

        let feed = handler(&backend).handle(FetchFeedQuery::default()).await;

        assert_eq!(feed.len(), 1);
        let entry = &feed[0];
        assert_eq!(entry.upvotes_count, 1);
        assert_eq!(entry.comments_count, 2);
        assert_eq!(entry.importance, "High");
        assert_eq!(entry.importance_rank, 3);
        assert_eq!(entry.author_name, "Ada Lovelace");
        assert!(!entry.can_edit);
    }

    #[tokio::test]
    async fn feed_is_ranked() {
        let backend = MemoryBackend::new();
        seed(&backend, "plain-new", "a", 300).await;
        let plain_old = seed(&backend, "plain-old", "a", 100).await;
        let urgent = seed(&backend, "urgent", "a", 50).await;
        add_status(&backend, &urgent, "critical", 60).await;
        backend.insert(&Upvote::new(plain_old.id, user("x"))).await.unwrap();

        let feed = handler(&backend).handle(FetchFeedQuery::default()).await;
        let names: Vec<_> = feed.iter().map(|e| e.name.as_str()).collect();

        assert_eq!(names, vec!["urgent", "plain-old", "plain-new"]);
    }

    #[tokio::test]
    async fn viewer_permissions_are_applied() {
        let backend = MemoryBackend::new();
        seed(&backend, "mine", "ada", 1).await;
        let mut viewer = SessionUser::without_profile(&BackendUser {
            id: user("ada"),
            email: "ada@campus.edu".into(),
        });
        viewer.role = Role::Student;

        let feed = handler(&backend)
            .handle(FetchFeedQuery {
                viewer: Some(viewer),
            })
            .await;

        assert!(feed[0].can_edit);
        assert!(feed[0].can_delete);
    }

    #[tokio::test]
    async fn failed_lookups_degrade_to_defaults() {
        let backend = MemoryBackend::new();
        let gym = seed(&backend, "Gym", "ada", 1).await;
        add_status(&backend, &gym, "high", 2).await;
        let failing = Arc::new(FailingLookups);
        let memory = Arc::new(backend.clone());
        let handler = FetchFeedHandler::new(memory.clone(), failing.clone(), memory, failing);

        let feed = handler.handle(FetchFeedQuery::default()).await;

        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].upvotes_count, 0);
        assert_eq!(feed[0].comments_count, 1);
        assert_eq!(feed[0].importance, "high");
        assert_eq!(feed[0].author_name, "Campus Member");
    }

    #[tokio::test]
    async fn failed_status_lookups_keep_upvotes() {
        let backend = MemoryBackend::new();
        let gym = seed(&backend, "Gym", "ada", 1).await;
        add_status(&backend, &gym, "critical", 2).await;
        backend.insert(&Upvote::new(gym.id, user("bob"))).await.unwrap();
        let memory = Arc::new(backend.clone());
        let handler = FetchFeedHandler::new(
            memory.clone(),
            memory.clone(),
            Arc::new(FailingLookups),
            memory,
        );

        let feed = handler.handle(FetchFeedQuery::default()).await;

        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].upvotes_count, 1);
        assert_eq!(feed[0].comments_count, 0);
        assert_eq!(feed[0].importance, "");
        assert_eq!(feed[0].importance_rank, 0);
        assert!(feed[0].latest_status.is_none());
    }

    #[tokio::test]
    async fn failed_resource_listing_yields_empty_feed() {
        let backend = Arc::new(MemoryBackend::new());
        let handler = FetchFeedHandler::new(
            Arc::new(FailingLookups),
            backend.clone(),
            backend.clone(),
            backend,
        );

        assert!(handler.handle(FetchFeedQuery::default()).await.is_empty());
    }
}

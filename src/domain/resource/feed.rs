//! Feed entries and their ordering.

use std::cmp::Reverse;

use crate::domain::foundation::{ResourceId, Timestamp, UserId};
use crate::domain::user::{SessionUser, DEFAULT_AUTHOR_NAME};

use super::{importance_rank, Resource, ResourcePermissions, StatusUpdate};

/// A resource joined with its counts, latest status and author, as listed on the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub id: ResourceId,
    pub name: String,
    pub content: String,
    pub image_url: String,
    pub author_id: Option<UserId>,
    pub author_name: String,
    pub upvotes_count: u64,
    pub comments_count: u64,
    pub created_at: Timestamp,
    pub latest_status: Option<StatusUpdate>,
    /// Raw importance label of the latest status; empty when there is none.
    pub importance: String,
    pub importance_rank: u8,
    pub can_edit: bool,
    pub can_delete: bool,
}

impl FeedEntry {
    /// Builds an entry for `viewer`.
    ///
    /// A blank `author_name` falls back to the default author name.
    pub fn new(
        resource: Resource,
        upvotes_count: u64,
        comments_count: u64,
        latest_status: Option<StatusUpdate>,
        author_name: Option<String>,
        viewer: Option<&SessionUser>,
    ) -> Self {
        let permissions = ResourcePermissions::for_viewer(resource.author_id.as_ref(), viewer);
        let importance = latest_status
            .as_ref()
            .map(|status| status.importance().to_string())
            .unwrap_or_default();
        let author_name = author_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_AUTHOR_NAME.to_string());

        Self {
            id: resource.id,
            name: resource.display_name().to_string(),
            importance_rank: importance_rank(&importance),
            importance,
            content: resource.content,
            image_url: resource.image_url,
            author_id: resource.author_id,
            author_name,
            upvotes_count,
            comments_count,
            created_at: resource.created_at,
            latest_status,
            can_edit: permissions.can_edit,
            can_delete: permissions.can_delete,
        }
    }
}

/// Orders the feed: importance rank, then upvotes, then recency, all descending.
pub fn rank_feed(entries: &mut [FeedEntry]) {
    entries.sort_by_key(|entry| {
        (
            Reverse(entry.importance_rank),
            Reverse(entry.upvotes_count),
            Reverse(entry.created_at),
        )
    });
}

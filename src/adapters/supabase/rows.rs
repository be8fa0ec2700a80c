//! Wire rows for the PostgREST tables.
//!
//! Text columns are nullable in the hosted schema, so every string field
//! defaults to empty when the backend sends `null`. `created_at` is `NOT NULL`
//! and required.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::foundation::{
    DomainError, ResourceId, StatusUpdateId, Timestamp, UpvoteId, UserId,
};
use crate::domain::resource::{Resource, StatusUpdate, Upvote};
use crate::domain::user::UserProfile;

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn user_id(raw: Option<String>) -> Option<UserId> {
    raw.and_then(|id| UserId::new(id).ok())
}

/// Row of `tweets`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceRow {
    pub id: ResourceId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image_url: String,
    #[serde(default)]
    pub author_id: Option<String>,
    pub created_at: Timestamp,
}

impl From<&Resource> for ResourceRow {
    fn from(resource: &Resource) -> Self {
        Self {
            id: resource.id,
            name: resource.name.clone(),
            content: resource.content.clone(),
            image_url: resource.image_url.clone(),
            author_id: resource.author_id.as_ref().map(|id| id.to_string()),
            created_at: resource.created_at,
        }
    }
}

impl From<ResourceRow> for Resource {
    fn from(row: ResourceRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            content: row.content,
            image_url: row.image_url,
            author_id: user_id(row.author_id),
            created_at: row.created_at,
        }
    }
}

/// Row of `tweet_replies`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusRow {
    pub id: StatusUpdateId,
    pub resource_id: ResourceId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub status_message: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub crowd_level: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub chips_available: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub queue_length: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub created_at: Timestamp,
}

impl From<&StatusUpdate> for StatusRow {
    fn from(status: &StatusUpdate) -> Self {
        Self {
            id: status.id,
            resource_id: status.resource_id,
            status_message: status.status_message.clone(),
            crowd_level: status.crowd_level.clone(),
            chips_available: status.chips_available.clone(),
            queue_length: status.queue_length.clone(),
            user_id: status.user_id.as_ref().map(|id| id.to_string()),
            created_at: status.created_at,
        }
    }
}

impl From<StatusRow> for StatusUpdate {
    fn from(row: StatusRow) -> Self {
        Self {
            id: row.id,
            resource_id: row.resource_id,
            status_message: row.status_message,
            crowd_level: row.crowd_level,
            chips_available: row.chips_available,
            queue_length: row.queue_length,
            user_id: user_id(row.user_id),
            created_at: row.created_at,
        }
    }
}

/// Row of `likes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpvoteRow {
    pub id: UpvoteId,
    pub resource_id: ResourceId,
    pub user_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub like_type: String,
}

impl From<&Upvote> for UpvoteRow {
    fn from(upvote: &Upvote) -> Self {
        Self {
            id: upvote.id,
            resource_id: upvote.resource_id,
            user_id: upvote.user_id.to_string(),
            like_type: upvote.like_type.clone(),
        }
    }
}

impl TryFrom<UpvoteRow> for Upvote {
    type Error = DomainError;

    fn try_from(row: UpvoteRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            resource_id: row.resource_id,
            user_id: UserId::new(row.user_id)?,
            like_type: row.like_type,
        })
    }
}

/// Argument of the feed lookup functions: `{"ids": [...]}`.
#[derive(Debug, Clone, Serialize)]
pub struct IdsArg<'a, T> {
    pub ids: &'a [T],
}

/// `user_profiles` rows map directly onto [`UserProfile`].
pub type ProfileRow = UserProfile;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_row_tolerates_nulls() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "name": null,
            "content": "Quiet study space",
            "image_url": null,
            "author_id": null,
            "created_at": "2024-01-15T10:30:00+00:00"
        }"#;
        let resource: Resource = serde_json::from_str::<ResourceRow>(json).unwrap().into();

        assert_eq!(resource.name, "");
        assert_eq!(resource.display_name(), "Quiet study space");
        assert_eq!(resource.author_id, None);
    }

    #[test]
    fn row_without_created_at_is_rejected() {
        let json = r#"{"id": "550e8400-e29b-41d4-a716-446655440000", "name": "Lab"}"#;

        assert!(serde_json::from_str::<ResourceRow>(json).is_err());
    }

    #[test]
    fn status_row_round_trips_importance_column() {
        let status = StatusUpdate::new(
            ResourceId::new(),
            crate::domain::resource::StatusFields {
                importance: "critical".into(),
                ..Default::default()
            },
            None,
        );
        let json = serde_json::to_value(StatusRow::from(&status)).unwrap();

        assert_eq!(json["chips_available"], "critical");
        assert!(json["user_id"].is_null());
    }

    #[test]
    fn empty_author_id_is_treated_as_absent() {
        let row = ResourceRow {
            id: ResourceId::new(),
            name: "x".into(),
            content: String::new(),
            image_url: String::new(),
            author_id: Some(String::new()),
            created_at: Timestamp::now(),
        };
        assert_eq!(Resource::from(row).author_id, None);
    }
}

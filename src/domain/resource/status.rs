//! Status updates and comments attached to a resource.

use crate::domain::foundation::{ResourceId, StatusUpdateId, Timestamp, UserId};

/// Attribute fields submitted with a status update.
///
/// `importance` is persisted in the `chips_available` column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusFields {
    pub status_message: String,
    pub crowd_level: String,
    pub importance: String,
    pub queue_length: String,
}

impl StatusFields {
    /// True when any attribute other than the message is set.
    pub fn has_attributes(&self) -> bool {
        !self.crowd_level.is_empty() || !self.importance.is_empty() || !self.queue_length.is_empty()
    }
}

/// A timestamped snapshot attached to a resource (row of `tweet_replies`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub id: StatusUpdateId,
    pub resource_id: ResourceId,
    pub status_message: String,
    pub crowd_level: String,
    pub chips_available: String,
    pub queue_length: String,
    pub user_id: Option<UserId>,
    pub created_at: Timestamp,
}

impl StatusUpdate {
    /// Creates a status update carrying all attribute fields.
    pub fn new(resource_id: ResourceId, fields: StatusFields, user_id: Option<UserId>) -> Self {
        Self {
            id: StatusUpdateId::new(),
            resource_id,
            status_message: fields.status_message,
            crowd_level: fields.crowd_level,
            chips_available: fields.importance,
            queue_length: fields.queue_length,
            user_id,
            created_at: Timestamp::now(),
        }
    }

    /// Creates a comment: a status update with only a message.
    pub fn comment(resource_id: ResourceId, message: impl Into<String>, user_id: UserId) -> Self {
        Self::new(
            resource_id,
            StatusFields {
                status_message: message.into(),
                ..Default::default()
            },
            Some(user_id),
        )
    }

    /// Importance label carried by this update (may be empty).
    pub fn importance(&self) -> &str {
        &self.chips_available
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_attributes_ignores_message() {
        let fields = StatusFields {
            status_message: "busy".to_string(),
            ..Default::default()
        };
        assert!(!fields.has_attributes());

        let fields = StatusFields {
            queue_length: "5".to_string(),
            ..Default::default()
        };
        assert!(fields.has_attributes());
    }

    #[test]
    fn importance_is_stored_as_chips_available() {
        let update = StatusUpdate::new(
            ResourceId::new(),
            StatusFields {
                importance: "High".to_string(),
                ..Default::default()
            },
            None,
        );

        assert_eq!(update.chips_available, "High");
        assert_eq!(update.importance(), "High");
    }

    #[test]
    fn comment_has_only_a_message() {
        let user = UserId::new("u-1").unwrap();
        let update = StatusUpdate::comment(ResourceId::new(), "nice", user.clone());

        assert_eq!(update.status_message, "nice");
        assert!(update.crowd_level.is_empty());
        assert!(update.chips_available.is_empty());
        assert_eq!(update.user_id, Some(user));
    }
}

//! Upvotes (rows of the `likes` table).

use std::fmt;

use crate::domain::foundation::{ResourceId, UpvoteId, UserId};

/// `like_type` value written for upvotes.
pub const UPVOTE_LIKE_TYPE: &str = "upvote";

/// A user's upvote on a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upvote {
    pub id: UpvoteId,
    pub resource_id: ResourceId,
    pub user_id: UserId,
    pub like_type: String,
}

impl Upvote {
    pub fn new(resource_id: ResourceId, user_id: UserId) -> Self {
        Self {
            id: UpvoteId::new(),
            resource_id,
            user_id,
            like_type: UPVOTE_LIKE_TYPE.to_string(),
        }
    }
}

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpvoteAction {
    Upvoted,
    Unupvoted,
}

impl UpvoteAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpvoteAction::Upvoted => "upvoted",
            UpvoteAction::Unupvoted => "unupvoted",
        }
    }
}

impl fmt::Display for UpvoteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

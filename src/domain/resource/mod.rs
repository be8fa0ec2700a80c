//! Resource module - shared campus resources and what is attached to them.
//!
//! - [`Resource`] - a shareable post (dining hall, lab, printer, ...)
//! - [`StatusUpdate`] - timestamped snapshot of crowd, importance and queue; plain
//!   comments are status updates carrying only a message
//! - [`Upvote`] - presence of a row means the user upvoted the resource
//! - [`FeedEntry`] - a resource joined with its counts, latest status and author,
//!   ranked by [`rank_feed`]
//!
//! # Domain Invariants
//!
//! 1. A resource always has a non-blank name
//! 2. A user has at most one upvote per resource
//! 3. Only the author, or faculty, may edit or delete a resource

mod access;
mod feed;
mod importance;
mod resource;
mod status;
mod upvote;

pub use access::ResourcePermissions;
pub use feed::{rank_feed, FeedEntry};
pub use importance::importance_rank;
pub use resource::{Resource, ResourceDetails};
pub use status::{StatusFields, StatusUpdate};
pub use upvote::{Upvote, UpvoteAction, UPVOTE_LIKE_TYPE};

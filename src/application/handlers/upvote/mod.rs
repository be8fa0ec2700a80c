//! Upvote handlers.

mod toggle_upvote;

pub use toggle_upvote::{ToggleUpvoteCommand, ToggleUpvoteHandler, ToggleUpvoteResult};

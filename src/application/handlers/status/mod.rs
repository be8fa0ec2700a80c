//! Status update and comment handlers.

mod add_comment;
mod list_comments;
mod post_status;

pub use add_comment::{AddCommentCommand, AddCommentHandler};
pub use list_comments::{CommentsView, ListCommentsHandler, ListCommentsQuery};
pub use post_status::{PostStatusCommand, PostStatusHandler};

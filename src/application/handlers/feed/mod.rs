//! Feed query handlers.

mod fetch_feed;

pub use fetch_feed::{FetchFeedHandler, FetchFeedQuery};

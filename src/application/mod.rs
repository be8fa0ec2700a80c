//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Commands (create, edit, delete, toggle) and queries (feed, comments, own
//! resources) are handled separately; the session bridge keeps backend tokens
//! alive across requests.

pub mod handlers;
pub mod session;

pub use session::{SessionBridge, DEFAULT_REFRESH_WINDOW};

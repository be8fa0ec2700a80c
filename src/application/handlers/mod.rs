//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations. Each handler
//! holds the ports it needs and exposes a single `handle` entry point.

pub mod account;
pub mod feed;
pub mod resource;
pub mod status;
pub mod upvote;

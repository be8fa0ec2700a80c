//! Campus Share - campus resource-sharing web application
//!
//! Students and faculty share campus resources, post status updates about them,
//! comment and upvote. Auth, tables and image storage come from a managed backend;
//! this crate renders the pages and ranks the feed.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

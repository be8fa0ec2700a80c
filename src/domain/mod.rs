//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, auth types)
//! - `user` - Campus accounts, roles and profiles
//! - `resource` - Shared resources, status updates, upvotes and feed ranking

pub mod foundation;
pub mod resource;
pub mod user;

//! In-memory adapters.
//!
//! A complete process-local backend: tables, storage, auth and web sessions.
//! Selected with `backend.provider = memory` for local development, and used by
//! the test suites.

mod auth;
mod image_storage;
mod profile_repository;
mod resource_repository;
mod session_store;
mod status_repository;
mod store;
mod upvote_repository;

pub use auth::MemoryAuthProvider;
pub use session_store::MemorySessionStore;
pub use store::MemoryBackend;

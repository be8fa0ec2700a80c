//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application and the managed backend. Adapters implement these ports:
//! `adapters::supabase` talks to the hosted platform over REST and
//! `adapters::memory` keeps everything in process.
//!
//! ## Backend Ports
//!
//! - `AuthProvider` - Password sign-in, sign-up, token refresh, sign-out
//! - `ResourceRepository` - Resources, with atomic create and cascading delete
//! - `StatusRepository` - Status updates and comments, with batched lookups
//! - `UpvoteRepository` - Upvote rows and counts
//! - `ProfileRepository` - Campus profiles and author names
//! - `ImageStorage` - Uploaded images and their public URLs
//!
//! ## Web Ports
//!
//! - `SessionStore` - Server-side web sessions keyed by the session cookie

mod auth_provider;
mod image_storage;
mod profile_repository;
mod resource_repository;
mod session_store;
mod status_repository;
mod upvote_repository;

pub use auth_provider::AuthProvider;
pub use image_storage::ImageStorage;
pub use profile_repository::ProfileRepository;
pub use resource_repository::ResourceRepository;
pub use session_store::SessionStore;
pub use status_repository::StatusRepository;
pub use upvote_repository::UpvoteRepository;

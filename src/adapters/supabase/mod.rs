//! Supabase adapters.
//!
//! Implementations of the backend ports against a hosted Supabase project over
//! REST. Every adapter shares one [`SupabaseClient`].

mod auth;
mod client;
mod image_storage;
mod profile_repository;
mod resource_repository;
mod rows;
mod status_repository;
mod upvote_repository;

pub use auth::SupabaseAuthProvider;
pub use client::{SupabaseClient, SupabaseConfig};
pub use image_storage::SupabaseImageStorage;
pub use profile_repository::SupabaseProfileRepository;
pub use resource_repository::SupabaseResourceRepository;
pub use status_repository::SupabaseStatusRepository;
pub use upvote_repository::SupabaseUpvoteRepository;

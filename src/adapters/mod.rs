//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `supabase` - hosted auth, PostgREST tables and object storage
//! - `memory` - process-local backend for development and tests
//! - `http` - axum pages and JSON endpoints

pub mod http;
pub mod memory;
pub mod supabase;

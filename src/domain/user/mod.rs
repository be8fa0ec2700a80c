//! User module - campus accounts and their profiles.
//!
//! A campus account is created in the auth provider; its profile row
//! (`user_profiles`) records the campus role and role-specific identifiers.
//! The web session keeps a denormalised copy of the profile as a [`SessionUser`].
//!
//! # Domain Invariants
//!
//! 1. Each profile belongs to exactly one auth-provider user
//! 2. `student_id` is only recorded for students
//! 3. `faculty_id` and `department` are only recorded for faculty
//! 4. Only the `admin` role grants admin pages

mod profile;
mod role;
mod web_session;

pub use profile::{NewProfile, SessionUser, UserProfile};
pub use role::Role;
pub use web_session::WebSession;

/// Display name used when a resource author has no profile or no name.
pub const DEFAULT_AUTHOR_NAME: &str = "Campus Member";

//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the campus share domain.

mod auth;
mod errors;
mod ids;
mod ownership;
mod timestamp;

pub use auth::{AuthError, AuthOutcome, BackendSession, BackendUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ResourceId, StatusUpdateId, UpvoteId, UserId, WebSessionId};
pub use ownership::OwnedByUser;
pub use timestamp::Timestamp;

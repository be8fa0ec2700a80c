//! Ownership trait for user-authored records.
//!
//! Resources carry an optional author. A record with no author has no owner, so
//! ownership checks against it always fail.
//!
//! # Example
//!
//! ```ignore
//! impl OwnedByUser for Resource {
//!     fn owner_id(&self) -> Option<&UserId> {
//!         self.author_id.as_ref()
//!     }
//! }
//!
//! resource.is_owner(&user_id);  // false for anyone when there is no author
//! ```

use super::UserId;

/// Trait for records that may have a single owning user.
pub trait OwnedByUser {
    /// Returns the ID of the user who owns this record, if any.
    fn owner_id(&self) -> Option<&UserId>;

    /// Checks if the given user is the owner.
    fn is_owner(&self, user_id: &UserId) -> bool {
        self.owner_id() == Some(user_id)
    }
}

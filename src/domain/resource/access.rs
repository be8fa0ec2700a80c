//! Who may change a resource.

use crate::domain::foundation::{DomainError, ErrorCode, OwnedByUser, UserId};
use crate::domain::user::SessionUser;

use super::Resource;

/// Edit and delete rights a viewer has on a resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourcePermissions {
    /// Only the author sees the edit control.
    pub can_edit: bool,
    /// The author and faculty may delete.
    pub can_delete: bool,
}

impl ResourcePermissions {
    /// Permissions of `viewer` on a resource authored by `author`.
    ///
    /// Anonymous viewers get no rights.
    pub fn for_viewer(author: Option<&UserId>, viewer: Option<&SessionUser>) -> Self {
        let Some(viewer) = viewer else {
            return Self::default();
        };
        let is_author = author == Some(&viewer.user_id);
        Self {
            can_edit: is_author,
            can_delete: is_author || viewer.role.moderates_resources(),
        }
    }
}

impl Resource {
    /// Author or faculty may modify (edit form, delete) this resource.
    pub fn can_be_modified_by(&self, user: &SessionUser) -> bool {
        self.is_owner(&user.user_id) || user.role.moderates_resources()
    }

    /// Like [`Resource::can_be_modified_by`] but as a `Forbidden` error.
    pub fn check_modifiable_by(&self, user: &SessionUser) -> Result<(), DomainError> {
        if self.can_be_modified_by(user) {
            return Ok(());
        }
        Err(
            DomainError::new(ErrorCode::Forbidden, "Not authorized")
                .with_detail("resource_id", self.id.to_string())
                .with_detail("requested_by", user.user_id.to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::BackendUser;
    use crate::domain::user::Role;

    fn viewer(id: &str, role: Role) -> SessionUser {
        let mut user = SessionUser::without_profile(&BackendUser {
            id: UserId::new(id).unwrap(),
            email: format!("{id}@campus.edu"),
        });
        user.role = role;
        user
    }

    fn author() -> UserId {
        UserId::new("author").unwrap()
    }

    #[test]
    fn anonymous_viewer_has_no_rights() {
        let perms = ResourcePermissions::for_viewer(Some(&author()), None);
        assert_eq!(perms, ResourcePermissions::default());
    }

    #[test]
    fn author_can_edit_and_delete() {
        let perms =
            ResourcePermissions::for_viewer(Some(&author()), Some(&viewer("author", Role::Student)));
        assert!(perms.can_edit);
        assert!(perms.can_delete);
    }

    #[test]
    fn faculty_can_delete_but_not_edit_others() {
        let perms =
            ResourcePermissions::for_viewer(Some(&author()), Some(&viewer("prof", Role::Faculty)));
        assert!(!perms.can_edit);
        assert!(perms.can_delete);
    }

    #[test]
    fn admin_has_no_moderation_rights_on_others() {
        let perms =
            ResourcePermissions::for_viewer(Some(&author()), Some(&viewer("root", Role::Admin)));
        assert!(!perms.can_edit);
        assert!(!perms.can_delete);
    }

    #[test]
    fn faculty_may_modify_any_resource() {
        let resource = Resource::new("Lab", "", "", Some(author())).unwrap();

        assert!(resource.can_be_modified_by(&viewer("prof", Role::Faculty)));
        assert!(resource.check_modifiable_by(&viewer("other", Role::Student)).is_err());
    }
}

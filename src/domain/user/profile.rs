//! Profile records and the signed-in user view kept in the web session.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{BackendUser, UserId};

use super::Role;

/// Row of the `user_profiles` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    pub email: String,
    pub role: Role,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faculty_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

/// Registration details before the auth provider has assigned a user id.
#[derive(Debug, Clone, Default)]
pub struct NewProfile {
    pub email: String,
    pub role: Role,
    pub full_name: String,
    pub student_id: String,
    pub faculty_id: String,
    pub department: String,
}

impl NewProfile {
    /// Builds the stored profile, keeping only the identifiers that apply to the role.
    pub fn into_profile(self, user_id: UserId) -> UserProfile {
        let (student_id, faculty_id, department) = match self.role {
            Role::Student => (non_empty(self.student_id), None, None),
            Role::Faculty => (None, non_empty(self.faculty_id), non_empty(self.department)),
            Role::Admin => (None, None, None),
        };
        UserProfile {
            user_id,
            email: self.email,
            role: self.role,
            full_name: self.full_name,
            student_id,
            faculty_id,
            department,
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// The signed-in user as remembered by the web session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub user_id: UserId,
    /// Email used to sign in; shown as the username.
    pub email: String,
    pub role: Role,
    pub full_name: String,
    pub student_id: String,
    pub faculty_id: String,
    pub department: String,
    pub is_admin: bool,
}

impl SessionUser {
    /// Session view of a user that has a profile row.
    pub fn from_profile(email: impl Into<String>, profile: &UserProfile) -> Self {
        Self {
            user_id: profile.user_id.clone(),
            email: email.into(),
            role: profile.role,
            full_name: profile.full_name.clone(),
            student_id: profile.student_id.clone().unwrap_or_default(),
            faculty_id: profile.faculty_id.clone().unwrap_or_default(),
            department: profile.department.clone().unwrap_or_default(),
            is_admin: profile.role.is_admin(),
        }
    }

    /// Session view of an account without a profile row: a plain student.
    pub fn without_profile(user: &BackendUser) -> Self {
        Self {
            user_id: user.id.clone(),
            email: user.email.clone(),
            role: Role::Student,
            full_name: String::new(),
            student_id: String::new(),
            faculty_id: String::new(),
            department: String::new(),
            is_admin: false,
        }
    }

    /// Name to greet the user with.
    pub fn display_name(&self) -> &str {
        if self.full_name.is_empty() {
            &self.email
        } else {
            &self.full_name
        }
    }
}

//! Account command and query handlers: sign-in, registration, sign-out, own resources.

mod list_own_resources;
mod register;
mod sign_in;
mod sign_out;

pub use list_own_resources::{ListOwnResourcesHandler, ListOwnResourcesQuery};
pub use register::{RegisterCommand, RegisterHandler};
pub use sign_in::{SignInCommand, SignInHandler};
pub use sign_out::SignOutHandler;

use thiserror::Error;

use crate::domain::foundation::BackendSession;
use crate::domain::user::SessionUser;

/// A signed-in account: who it is and the backend tokens issued for it.
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub user: SessionUser,
    /// `None` when the backend withheld tokens (email confirmation pending).
    pub session: Option<BackendSession>,
}

/// Errors shown on the login and registration forms.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Login failed: {0}")]
    LoginFailed(String),

    #[error("Registration failed: {0}")]
    RegistrationFailed(String),

    #[error("Failed to create user profile")]
    ProfileCreationFailed,
}

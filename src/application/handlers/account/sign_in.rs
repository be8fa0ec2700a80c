//! SignInHandler - Command handler for password sign-in.

use std::sync::Arc;

use crate::domain::user::SessionUser;
use crate::ports::{AuthProvider, ProfileRepository};

use super::{AccountError, SignedIn};

/// Command to sign in with email and password.
#[derive(Debug, Clone)]
pub struct SignInCommand {
    pub email: String,
    pub password: String,
}

/// Handler for signing in.
///
/// An account without a profile row signs in as a plain student.
pub struct SignInHandler {
    auth: Arc<dyn AuthProvider>,
    profiles: Arc<dyn ProfileRepository>,
}

impl SignInHandler {
    pub fn new(auth: Arc<dyn AuthProvider>, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { auth, profiles }
    }

    pub async fn handle(&self, cmd: SignInCommand) -> Result<SignedIn, AccountError> {
        let outcome = self
            .auth
            .sign_in(&cmd.email, &cmd.password)
            .await
            .map_err(|e| AccountError::LoginFailed(e.to_string()))?;

        let profile = self
            .profiles
            .find_by_user(&outcome.user.id)
            .await
            .map_err(|e| AccountError::LoginFailed(e.message().to_string()))?;

        let user = match profile {
            Some(profile) => SessionUser::from_profile(cmd.email.clone(), &profile),
            None => {
                tracing::info!(user_id = %outcome.user.id, "Signed-in account has no profile");
                let mut user = SessionUser::without_profile(&outcome.user);
                user.email = cmd.email.clone();
                user
            }
        };

        tracing::info!(user_id = %user.user_id, role = %user.role, "User signed in");
        Ok(SignedIn {
            user,
            session: outcome.session,
        })
    }
}

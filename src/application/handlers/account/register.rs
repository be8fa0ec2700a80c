//! RegisterHandler - Command handler for account registration.
//!
//! Creates the auth account, then the profile row. Tokens are passed back when
//! the backend issued them so the new user lands signed in.

use std::sync::Arc;

use crate::domain::user::{NewProfile, SessionUser};
use crate::ports::{AuthProvider, ProfileRepository};

use super::{AccountError, SignedIn};

/// Command to register a campus account.
#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub password: String,
    /// Email, role, name and role-specific identifiers.
    pub profile: NewProfile,
}

/// Handler for registering accounts.
pub struct RegisterHandler {
    auth: Arc<dyn AuthProvider>,
    profiles: Arc<dyn ProfileRepository>,
}

impl RegisterHandler {
    pub fn new(auth: Arc<dyn AuthProvider>, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { auth, profiles }
    }

    pub async fn handle(&self, cmd: RegisterCommand) -> Result<SignedIn, AccountError> {
        let email = cmd.profile.email.clone();
        let outcome = self
            .auth
            .sign_up(&email, &cmd.password)
            .await
            .map_err(|e| AccountError::RegistrationFailed(e.to_string()))?;

        let profile = cmd.profile.into_profile(outcome.user.id.clone());
        if let Err(e) = self.profiles.create(&profile).await {
            tracing::error!(user_id = %profile.user_id, error = %e, "Profile insert failed");
            return Err(AccountError::ProfileCreationFailed);
        }

        tracing::info!(user_id = %profile.user_id, role = %profile.role, "Account registered");
        Ok(SignedIn {
            user: SessionUser::from_profile(email, &profile),
            session: outcome.session,
        })
    }
}

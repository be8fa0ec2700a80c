//! SignOutHandler - revokes the backend session. Never fails; errors are logged.

use std::sync::Arc;

use crate::ports::AuthProvider;

pub struct SignOutHandler {
    auth: Arc<dyn AuthProvider>,
}

impl SignOutHandler {
    pub fn new(auth: Arc<dyn AuthProvider>) -> Self {
        Self { auth }
    }

    pub async fn handle(&self, access_token: Option<&str>) {
        let Some(token) = access_token else {
            return;
        };
        if let Err(e) = self.auth.sign_out(token).await {
            tracing::warn!(error = %e, "Backend sign-out failed");
        }
    }
}

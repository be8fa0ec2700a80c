//! Shared application state for the HTTP layer.

use std::sync::Arc;
use std::time::Duration;

use crate::adapters::memory::{MemoryAuthProvider, MemoryBackend};
use crate::adapters::supabase::{
    SupabaseAuthProvider, SupabaseClient, SupabaseImageStorage, SupabaseProfileRepository,
    SupabaseResourceRepository, SupabaseStatusRepository, SupabaseUpvoteRepository,
};
use crate::application::handlers::account::{
    ListOwnResourcesHandler, RegisterHandler, SignInHandler, SignOutHandler,
};
use crate::application::handlers::feed::FetchFeedHandler;
use crate::application::handlers::resource::{
    CreateResourceHandler, DeleteResourceHandler, EditResourceHandler,
};
use crate::application::handlers::status::{
    AddCommentHandler, ListCommentsHandler, PostStatusHandler,
};
use crate::application::handlers::upvote::ToggleUpvoteHandler;
use crate::application::SessionBridge;
use crate::ports::{
    AuthProvider, ImageStorage, ProfileRepository, ResourceRepository, StatusRepository,
    UpvoteRepository,
};

use super::middleware::SessionManager;

/// The managed backend's ports, whichever adapter provides them.
#[derive(Clone)]
pub struct BackendPorts {
    pub auth: Arc<dyn AuthProvider>,
    pub resources: Arc<dyn ResourceRepository>,
    pub statuses: Arc<dyn StatusRepository>,
    pub upvotes: Arc<dyn UpvoteRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub images: Arc<dyn ImageStorage>,
}

impl BackendPorts {
    /// Ports backed by a hosted Supabase project.
    pub fn supabase(client: SupabaseClient) -> Self {
        Self {
            auth: Arc::new(SupabaseAuthProvider::new(client.clone())),
            resources: Arc::new(SupabaseResourceRepository::new(client.clone())),
            statuses: Arc::new(SupabaseStatusRepository::new(client.clone())),
            upvotes: Arc::new(SupabaseUpvoteRepository::new(client.clone())),
            profiles: Arc::new(SupabaseProfileRepository::new(client.clone())),
            images: Arc::new(SupabaseImageStorage::new(client)),
        }
    }

    /// Ports backed by process memory.
    pub fn in_memory(backend: Arc<MemoryBackend>, auth: Arc<MemoryAuthProvider>) -> Self {
        Self {
            auth,
            resources: backend.clone(),
            statuses: backend.clone(),
            upvotes: backend.clone(),
            profiles: backend.clone(),
            images: backend,
        }
    }
}

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct AppState {
    pub ports: BackendPorts,
    pub sessions: Arc<SessionManager>,
    pub bridge: SessionBridge,
}

impl AppState {
    pub fn new(ports: BackendPorts, sessions: SessionManager, refresh_window: Duration) -> Self {
        let bridge = SessionBridge::new(ports.auth.clone(), refresh_window);
        Self {
            ports,
            sessions: Arc::new(sessions),
            bridge,
        }
    }

    pub fn fetch_feed_handler(&self) -> FetchFeedHandler {
        FetchFeedHandler::new(
            self.ports.resources.clone(),
            self.ports.upvotes.clone(),
            self.ports.statuses.clone(),
            self.ports.profiles.clone(),
        )
    }

    pub fn sign_in_handler(&self) -> SignInHandler {
        SignInHandler::new(self.ports.auth.clone(), self.ports.profiles.clone())
    }

    pub fn register_handler(&self) -> RegisterHandler {
        RegisterHandler::new(self.ports.auth.clone(), self.ports.profiles.clone())
    }

    pub fn sign_out_handler(&self) -> SignOutHandler {
        SignOutHandler::new(self.ports.auth.clone())
    }

    pub fn list_own_resources_handler(&self) -> ListOwnResourcesHandler {
        ListOwnResourcesHandler::new(self.ports.resources.clone())
    }

    pub fn create_resource_handler(&self) -> CreateResourceHandler {
        CreateResourceHandler::new(self.ports.resources.clone(), self.ports.images.clone())
    }

    pub fn edit_resource_handler(&self) -> EditResourceHandler {
        EditResourceHandler::new(self.ports.resources.clone())
    }

    pub fn delete_resource_handler(&self) -> DeleteResourceHandler {
        DeleteResourceHandler::new(self.ports.resources.clone())
    }

    pub fn post_status_handler(&self) -> PostStatusHandler {
        PostStatusHandler::new(self.ports.statuses.clone())
    }

    pub fn add_comment_handler(&self) -> AddCommentHandler {
        AddCommentHandler::new(self.ports.statuses.clone())
    }

    pub fn list_comments_handler(&self) -> ListCommentsHandler {
        ListCommentsHandler::new(self.ports.resources.clone(), self.ports.statuses.clone())
    }

    pub fn toggle_upvote_handler(&self) -> ToggleUpvoteHandler {
        ToggleUpvoteHandler::new(self.ports.resources.clone(), self.ports.upvotes.clone())
    }
}

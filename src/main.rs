//! Campus Share server binary.

use std::error::Error;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tower_http::timeout::TimeoutLayer;
use tracing_subscriber::EnvFilter;

use campus_share::adapters::http::{app_router, AppState, BackendPorts, SessionManager};
use campus_share::adapters::memory::{MemoryAuthProvider, MemoryBackend, MemorySessionStore};
use campus_share::adapters::supabase::SupabaseClient;
use campus_share::config::{AppConfig, BackendProvider, ConfigError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate().map_err(ConfigError::from)?;

    let ports = match config.backend.provider {
        BackendProvider::Supabase => {
            tracing::info!(url = %config.backend.url, "Using Supabase backend");
            BackendPorts::supabase(SupabaseClient::from_config(&config.backend)?)
        }
        BackendProvider::Memory => {
            tracing::warn!("Using in-memory backend; data is lost on restart");
            BackendPorts::in_memory(
                Arc::new(MemoryBackend::new()),
                Arc::new(MemoryAuthProvider::new()),
            )
        }
    };
    let sessions = SessionManager::new(Arc::new(MemorySessionStore::new()), &config.session)?;
    let state = AppState::new(ports, sessions, config.session.refresh_window());

    let app = app_router(state).layer(TimeoutLayer::new(config.server.request_timeout()));

    let address = config.server.socket_addr()?;
    let listener = TcpListener::bind(address).await?;
    tracing::info!(%address, environment = %config.server.environment, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received terminate signal, shutting down"),
    }
}

//! Task Manager Server
//!
//! An async Rust server exposing the task board REST API.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use task_manager::{
    bootstrap,
    config::{AppConfig, AuthConfig, DatabaseConfig, StorageKind},
    db::{create_pool, init_schema, PgRepository},
    repository::{MemoryRepository, SharedRepository},
    router::build_router,
    state::AppState,
    ResultExt,
};

/// Initialize tracing/logging.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,task_manager=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Open the configured storage backend.
async fn open_repository(kind: StorageKind) -> anyhow::Result<SharedRepository> {
    match kind {
        StorageKind::Postgres => {
            let db_config = DatabaseConfig::from_env().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to load database config, using defaults");
                DatabaseConfig::default()
            });

            let pool = create_pool(&db_config).await.log("connecting to PostgreSQL")?;
            init_schema(&pool).await.log("initializing schema")?;
            Ok(Arc::new(PgRepository::new(pool)))
        }
        StorageKind::Memory => {
            tracing::warn!("Using in-memory storage, data is lost on restart");
            Ok(Arc::new(MemoryRepository::new()))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting Task Manager"
    );

    // Load configuration
    let app_config = AppConfig::from_env().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load app config, using defaults");
        AppConfig::default()
    });

    let auth_config = AuthConfig::from_env().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load auth config, using defaults");
        AuthConfig::default()
    });

    if auth_config.uses_default_secret() {
        tracing::warn!("JWT_SECRET not set, using default (not secure for production)");
    }

    let storage = app_config.storage_kind()?;

    tracing::info!(
        host = %app_config.host,
        port = app_config.port,
        debug = app_config.debug,
        storage = ?storage,
        "Configuration loaded"
    );

    let repo = open_repository(storage).await?;

    // Create application state and seed it
    let addr: SocketAddr = app_config.bind_address().parse()?;
    let state = AppState::new(repo, app_config, &auth_config);
    bootstrap::run(&state).await.log("seeding initial data")?;

    // Build the router
    let app = build_router(state);

    let listener = TcpListener::bind(addr).await?;

    tracing::info!(address = %addr, "Server listening");

    // Run the server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use lantern_cloud::{BlobStore, LocalBlobStore, S3BlobStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lantern_api::config::{ServerConfig, StorageConfig};
use lantern_api::router::build_app_router;
use lantern_api::sessions::{run_sweeper, SessionManager};
use lantern_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lantern_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = lantern_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    lantern_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    lantern_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Blob store ---
    let blob_store: Arc<dyn BlobStore> = match &config.storage {
        StorageConfig::Local {
            base_path,
            public_base_url,
        } => {
            tracing::info!(base_path = %base_path, "Using local blob store");
            Arc::new(LocalBlobStore::new(base_path, public_base_url.as_str()))
        }
        StorageConfig::S3 {
            bucket,
            public_base_url,
        } => {
            tracing::info!(bucket = %bucket, "Using S3 blob store");
            Arc::new(S3BlobStore::from_env(bucket.as_str(), public_base_url.as_str()).await)
        }
    };

    // --- Viewing sessions ---
    let sessions = Arc::new(SessionManager::new(Duration::from_secs(
        config.session_idle_secs,
    )));
    let sweeper_cancel = tokio_util::sync::CancellationToken::new();
    let sweeper_handle = tokio::spawn(run_sweeper(
        Arc::clone(&sessions),
        sweeper_cancel.clone(),
    ));
    tracing::info!("Session sweeper started");

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        blob_store,
        sessions: Arc::clone(&sessions),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    sweeper_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), sweeper_handle).await;
    tracing::info!("Session sweeper stopped");

    let torn_down = sessions.teardown_all().await;
    tracing::info!(torn_down, "Remaining viewing sessions torn down");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}

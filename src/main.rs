//! Posts API
//!
//! A small REST service over two PostgreSQL tables: posts and the comments
//! attached to them. Every request is one pooled round trip to the database.

mod config;
mod db;
mod error;
mod models;
mod routes;
mod state;

use crate::config::Settings;
use crate::routes::create_router;
use crate::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber for structured logging
    init_tracing();

    info!("Starting Posts API...");

    // Load configuration; a missing PORT stops us here
    let settings = Settings::load().map_err(|e| {
        error!("FATAL: {}", e);
        e
    })?;
    info!("Configuration loaded (TLS: {:?})", settings.database.tls);

    let pool = db::create_pool(&settings.database)?;
    if let Err(e) = db::verify_connection(&pool).await {
        error!("FATAL: Failed to connect to database: {}", e);
        return Err(e.into());
    }

    if settings.database.init_schema {
        db::init_schema(&pool).await?;
    }

    let state = Arc::new(AppState::new(pool, settings.posts_limit));
    let app = create_router(state);

    let addr = SocketAddr::from((settings.server.host, settings.server.port));

    info!("Server is up and running on http://{}", addr);
    info!("   GET    /posts");
    info!("   POST   /posts");
    info!("   GET    /posts/{{id}}");
    info!("   PUT    /posts/{{id}}");
    info!("   DELETE /posts/{{id}}");
    info!("   GET    /posts/{{id}}/comments");
    info!("   POST   /posts/{{id}}/comments");
    info!("   PUT    /posts/{{id}}/comments/{{comment_id}}");
    info!("   DELETE /posts/{{id}}/comments/{{comment_id}}");

    // Create TCP listener and serve
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

const DEFAULT_LOG_FILTER: &str = "info,posts_api=debug,tower_http=debug";

/// Log to stdout, filtered by `RUST_LOG`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).compact())
        .init();
}

/// Resolves on the first of Ctrl+C or SIGTERM.
///
/// A signal whose handler cannot be installed is logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => "Ctrl+C",
            Err(e) => {
                error!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending().await
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                "SIGTERM"
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<&str>();

    let received = tokio::select! {
        name = ctrl_c => name,
        name = terminate => name,
    };
    info!("Received {}, draining connections", received);
}

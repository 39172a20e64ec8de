//! Lesson booking HTTP server binary.
//!
//! Connects the repository, sets up the HTTP router, and serves requests
//! until Ctrl-C or SIGTERM, then closes the store connection.
//!
//! # Usage
//!
//! ```bash
//! # Run with the in-memory repository (default)
//! cargo run --bin booking-server
//!
//! # Run against MongoDB
//! MONGODB_URI=mongodb://localhost:27017 DB_NAME=booking \
//!   cargo run --bin booking-server --features "mongo-repo"
//! ```
//!
//! # Environment Variables
//!
//! A `.env` file in the working directory is loaded first, if present.
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 3000)
//! - `IMAGES_DIR`: Directory served under `/images` (default: images)
//! - `REPOSITORY_TYPE`: `mongo` or `local` (default: mongo when `MONGODB_URI` is set)
//! - `MONGODB_URI`, `DB_NAME`: MongoDB connection
//! - `RUST_LOG`: Log level (default: info)

use std::env;

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use lesson_booking::config::ServerConfig;
use lesson_booking::db::{ConnectionRepository, RepositoryFactory};
use lesson_booking::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Missing .env is fine; real deployments set the variables directly.
    let dotenv = dotenvy::dotenv();

    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    match dotenv {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Ignoring unreadable .env file: {}", e),
    }

    info!("Starting lesson booking server");

    let config = ServerConfig::from_env()?;

    let repository = RepositoryFactory::from_env().await?;
    info!("Repository initialized successfully");

    let state = AppState::new(repository.clone());
    let app = create_router(state, &config.images_dir);

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down");
    repository.close().await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
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
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Progress-Tracker API Server
//!
//! Serves per-platform contest and submission history for each user and
//! accepts new history entries from ingestion workers.

use progress_tracker::{
    config::{Config, StoreBackend},
    db::{DocumentStore, FirestoreDb, MemoryDb},
    services::ProgressStore,
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        backend = ?config.store_backend,
        timeout_secs = config.store_timeout.as_secs(),
        "Starting Progress-Tracker API"
    );

    // Open the store once for the whole process
    let db: Arc<dyn DocumentStore> = match config.store_backend {
        StoreBackend::Firestore => Arc::new(FirestoreDb::new(&config.gcp_project_id).await?),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on exit");
            Arc::new(MemoryDb::new())
        }
    };
    let store = ProgressStore::new(db, config.store_timeout);

    let state = Arc::new(AppState {
        config: config.clone(),
        store: store.clone(),
    });

    let app = progress_tracker::routes::create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let served: std::io::Result<()> = async {
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        tracing::info!(address = %addr, "Server listening");
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
    .await;

    // Release the store on every exit path, then report how serving ended.
    store.close();
    served?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "progress_tracker=debug,info".into()),
        )
        .with(format)
        .init();
}

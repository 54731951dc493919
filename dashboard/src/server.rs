//! HTTP server for the dashboard.
//!
//! Binds the listener, serves the dashboard router and shuts down cleanly on
//! Ctrl+C or SIGTERM.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::admin::{AppState, dashboard_router};

/// Serve the dashboard until a shutdown signal arrives.
pub async fn run_server(listen_addr: SocketAddr, state: Arc<AppState>) -> Result<()> {
    let app = dashboard_router(state);

    let listener = TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("Failed to bind HTTP listener on {listen_addr}"))?;

    info!(addr = %listen_addr, "Dashboard listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Dashboard stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received");
}

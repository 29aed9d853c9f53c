//! TicketBoss HTTP server.
//!
//! Serves seat reservations for a single event from memory.

use anyhow::Context;
use std::sync::Arc;
use ticketboss::app::ReservationService;
use ticketboss::config::Config;
use ticketboss::server::{AppState, build_router};
use ticketboss_runtime::metrics::MetricsServer;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // `.env` is optional
    let _ = dotenvy::dotenv();

    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("ticketboss={0},ticketboss_runtime={0},tower_http=info", config.server.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting TicketBoss HTTP server");

    config.validate().context("Invalid configuration")?;
    info!(
        event_id = %config.event.event_id,
        total_seats = config.event.total_seats,
        metrics_enabled = config.metrics.enabled,
        "Configuration loaded"
    );

    if config.metrics.enabled {
        let mut metrics = MetricsServer::new(config.metrics_addr()?);
        metrics.start().context("Failed to start metrics exporter")?;
    }

    let reservations = Arc::new(ReservationService::with_system_environment(config.event.clone()));
    let app = build_router(AppState::new(reservations));

    let addr = config.server_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

/// Waits for Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            warn!(%error, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(error) => {
                warn!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}

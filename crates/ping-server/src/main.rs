//! `ping-server`: binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise the telemetry pipeline (JSON logs, optional OTLP).
//! 3. Build the server; handler dependencies come from the config.
//! 4. Spawn the signal watcher that cancels the shutdown token.
//! 5. Serve HTTPS until shutdown.

use anyhow::{Context, Result};
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::info;

use ping_server::{telemetry, Config, Server};

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_telemetry(&cfg.log_level, cfg.otel_exporter_otlp_endpoint.as_deref())?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        port = cfg.port,
        "ping-server starting"
    );

    // -----------------------------------------------------------------------
    // 3. Server
    // -----------------------------------------------------------------------
    let shutdown = CancellationToken::new();
    let server = Server::from_config(cfg, shutdown.clone());

    // -----------------------------------------------------------------------
    // 4. Shutdown watcher
    // -----------------------------------------------------------------------
    tokio::spawn(cancel_on_signal(shutdown));

    // -----------------------------------------------------------------------
    // 5. HTTPS server
    // -----------------------------------------------------------------------
    let result = server
        .serve()
        .await
        .context("ping-server failed");

    telemetry::init::shutdown_telemetry();
    result
}

/// Cancel `token` on the first SIGINT or SIGTERM.
async fn cancel_on_signal(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C"),
        _ = terminate => info!("received SIGTERM"),
    }
    info!("shutting down the HTTPS server");
    token.cancel();
}

//! auth-gate
//!
//! A single-endpoint HTTP service that checks a query-string credential.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request ──▶ listener ──▶ log_request ──▶ GET /test ──▶ {"code":200|401}
//!                                         │               │
//!                                         ▼               ▼
//!                                  ┌──────────────────────────────┐
//!                                  │ Logger: stdout + auth.log    │
//!                                  │ (size-rotated, gzipped)      │
//!                                  └──────────────────────────────┘
//! ```

use auth_gate::config::ServiceConfig;
use auth_gate::http::HttpServer;
use auth_gate::lifecycle::{signals, startup, Shutdown};

#[tokio::main]
async fn main() {
    let config = ServiceConfig::default();

    let logger = startup::logger_or_exit(&config.logging);
    tracing::info!(
        bind_address = %config.listener.bind_address,
        log_file = %config.logging.file_path,
        "Starting server"
    );

    let listener = startup::bind_or_exit(&config.listener, &logger).await;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let signal = signals::wait_for_signal().await;
        tracing::info!(signal = %signal, "Shutdown signal received");
        shutdown.trigger();
    });

    let server = HttpServer::new(config, logger.clone());
    if let Err(e) = server.run(listener, server_shutdown).await {
        auth_gate::fatal!(logger, e, "Failed to start server");
    }

    tracing::info!("Shutdown complete");
    logger.sync();
}

//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the logger, aborting the process if that is impossible
//! - Bind the listener, recording a fatal event if that fails
//!
//! # Design Decisions
//! - Logger failures go to stderr because no logger exists yet
//! - Listener failures go through the logger so they reach the log file

use tokio::net::TcpListener;

use crate::config::{ListenerConfig, LoggingConfig};
use crate::observability::Logger;

/// Build and globally install the logger, or exit with status 1.
pub fn logger_or_exit(config: &LoggingConfig) -> Logger {
    let logger = match Logger::init(config) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Failed to create logger: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = logger.install_global() {
        crate::fatal!(logger, e, "Failed to install logger");
    }
    logger
}

/// Bind the configured address, or record a fatal event and exit.
pub async fn bind_or_exit(config: &ListenerConfig, logger: &Logger) -> TcpListener {
    match TcpListener::bind(&config.bind_address).await {
        Ok(listener) => listener,
        Err(e) => crate::fatal!(logger, e, "Failed to start server"),
    }
}

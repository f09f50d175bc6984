//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (sizes > 0, known level names)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LoggingConfig → Result<(), Vec<ConfigError>>

use thiserror::Error;

use crate::config::schema::LoggingConfig;

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single invalid setting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown log level `{0}`")]
    UnknownLevel(String),

    #[error("log file path must not be empty")]
    EmptyFilePath,

    #[error("max_size_mb must be greater than zero")]
    ZeroMaxSize,
}

/// Check the logging settings, collecting every problem found.
pub fn validate_logging(config: &LoggingConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LEVELS.contains(&config.level.to_ascii_lowercase().as_str()) {
        errors.push(ConfigError::UnknownLevel(config.level.clone()));
    }
    if config.file_path.trim().is_empty() {
        errors.push(ConfigError::EmptyFilePath);
    }
    if config.max_size_mb == 0 {
        errors.push(ConfigError::ZeroMaxSize);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

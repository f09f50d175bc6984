//! Configuration schema definitions.
//!
//! Every value here is a compiled-in constant; tests override single fields
//! with struct update syntax.

/// Root configuration for the service.
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Credential check settings.
    pub auth: AuthConfig,

    /// Log sink settings.
    pub logging: LoggingConfig,
}

/// Listener configuration.
#[derive(Debug, Clone)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Query-string credential check.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Name of the query parameter carrying the credential.
    pub query_param: String,

    /// Value the credential must equal exactly.
    pub expected: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            query_param: "auth".to_string(),
            expected: "Ivan".to_string(),
        }
    }
}

impl AuthConfig {
    /// Case-sensitive, untrimmed comparison against the expected value.
    pub fn is_authorized(&self, supplied: &str) -> bool {
        supplied == self.expected
    }
}

/// Log sink configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Level threshold (trace, debug, info, warn, error).
    pub level: String,

    /// Mirror every line to standard output.
    pub stdout: bool,

    /// Path of the active log file.
    pub file_path: String,

    /// Rotate once the active file would grow past this many megabytes.
    pub max_size_mb: u64,

    /// Number of rotated files to keep (0 = unlimited).
    pub max_backups: usize,

    /// Remove rotated files older than this many days (0 = never).
    pub max_age_days: u64,

    /// Gzip rotated files.
    pub compress: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "debug".to_string(),
            stdout: true,
            file_path: "auth.log".to_string(),
            max_size_mb: 500,
            max_backups: 3,
            max_age_days: 28,
            compress: true,
        }
    }
}

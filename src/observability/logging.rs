//! Structured logging.
//!
//! # Responsibilities
//! - Build the process logger: console-encoded lines to stdout and a rotating file
//! - Hand the logger to request handlers by value instead of through a global
//! - Flush buffered file output on every exit path
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging; callers emit with the usual macros
//!   inside [`Logger::in_scope`]
//! - File output goes through a non-blocking worker that owns the [`RotatingFile`]
//! - Log level comes from config alone; the environment never changes it

use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;
use tracing::Dispatch;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{
        self,
        format::{DefaultFields, Format, Full},
        time::ChronoLocal,
        MakeWriter,
    },
    layer::SubscriberExt,
    EnvFilter, Registry,
};

use crate::config::{validate_logging, ConfigError, LoggingConfig};
use crate::observability::rotation::{RotatingFile, RotationPolicy};

/// Errors raised while building the logger.
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("invalid logging configuration: {}", join_errors(.0))]
    Config(Vec<ConfigError>),

    #[error("cannot open log file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("a global logger is already installed")]
    AlreadyInstalled,
}

fn join_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

type ConsoleLayer<S, W> = fmt::Layer<S, DefaultFields, Format<Full, ChronoLocal>, W>;

/// `time level logger: caller: message fields` with no colour codes.
fn console_layer<S, W>(make_writer: W) -> ConsoleLayer<S, W>
where
    W: for<'w> MakeWriter<'w> + 'static,
{
    fmt::layer()
        .with_timer(ChronoLocal::rfc_3339())
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_writer(make_writer)
}

fn default_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), config.level))
}

/// Process-lifetime log sink.
///
/// Cloning is cheap; every clone records to the same outputs.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<Inner>,
}

struct Inner {
    dispatch: Dispatch,
    guards: Mutex<Vec<WorkerGuard>>,
}

impl Logger {
    /// Build the production logger: stdout (if enabled) plus the rotating file.
    pub fn init(config: &LoggingConfig) -> Result<Self, LoggerError> {
        validate_logging(config).map_err(LoggerError::Config)?;

        let file = RotatingFile::open(&config.file_path, RotationPolicy::from_config(config))
            .map_err(|source| LoggerError::Io {
                path: PathBuf::from(&config.file_path),
                source,
            })?;
        let (file_writer, guard) = tracing_appender::non_blocking(file);

        let stdout = config.stdout.then(|| console_layer(io::stdout));

        let subscriber = Registry::default()
            .with(default_filter(config))
            .with(stdout)
            .with(console_layer(file_writer));

        Ok(Self::from_parts(Dispatch::new(subscriber), vec![guard]))
    }

    /// Build a logger that writes every line to `make_writer` only.
    pub fn with_writer<W>(config: &LoggingConfig, make_writer: W) -> Result<Self, LoggerError>
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        validate_logging(config).map_err(LoggerError::Config)?;

        let subscriber = Registry::default()
            .with(default_filter(config))
            .with(console_layer(make_writer));

        Ok(Self::from_parts(Dispatch::new(subscriber), Vec::new()))
    }

    fn from_parts(dispatch: Dispatch, guards: Vec<WorkerGuard>) -> Self {
        Self {
            inner: Arc::new(Inner {
                dispatch,
                guards: Mutex::new(guards),
            }),
        }
    }

    /// Run `f` with this logger receiving every event it emits.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.inner.dispatch, f)
    }

    /// Make this logger the process-wide default.
    pub fn install_global(&self) -> Result<(), LoggerError> {
        tracing::dispatcher::set_global_default(self.inner.dispatch.clone())
            .map_err(|_| LoggerError::AlreadyInstalled)
    }

    /// Flush buffered file output and stop the background writer.
    ///
    /// Safe to call more than once. Events recorded afterwards reach stdout only.
    pub fn sync(&self) {
        let guards = std::mem::take(
            &mut *self
                .inner
                .guards
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        );
        drop(guards);
    }

    /// Flush and exit with status 1. Reached through [`fatal!`](crate::fatal).
    pub fn exit_fatal(&self) -> ! {
        self.sync();
        std::process::exit(1)
    }
}

/// Record an error-level event at the call site, flush the logger, and exit
/// with status 1.
///
/// ```ignore
/// fatal!(logger, err, "Failed to start server");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $error:expr, $message:literal) => {{
        let logger: &$crate::observability::Logger = &$logger;
        logger.in_scope(|| ::tracing::error!(error = %$error, $message));
        logger.exit_fatal()
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn file_config(path: &std::path::Path) -> LoggingConfig {
        LoggingConfig {
            stdout: false,
            file_path: path.to_string_lossy().into_owned(),
            ..LoggingConfig::default()
        }
    }

    #[test]
    fn rejects_invalid_config() {
        let config = LoggingConfig {
            max_size_mb: 0,
            ..LoggingConfig::default()
        };
        let err = Logger::with_writer(&config, io::sink).err().unwrap();
        assert!(matches!(err, LoggerError::Config(ref errors) if errors == &[ConfigError::ZeroMaxSize]));
        assert_eq!(
            err.to_string(),
            "invalid logging configuration: max_size_mb must be greater than zero"
        );
    }

    #[test]
    fn reports_unopenable_file() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened for appending.
        let err = Logger::init(&file_config(dir.path())).err().unwrap();
        assert!(matches!(err, LoggerError::Io { .. }));
    }

    #[test]
    fn writes_console_lines_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth.log");
        let logger = Logger::init(&file_config(&path)).unwrap();

        logger.in_scope(|| {
            tracing::debug!(method = %"GET", "Request");
            tracing::warn!("Unauthorized");
        });
        logger.sync();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        assert!(lines[0].contains("DEBUG"));
        assert!(lines[0].contains("auth_gate::observability::logging"));
        assert!(lines[0].contains("src/observability/logging.rs:"));
        assert!(lines[0].contains("Request method=GET"));
        assert!(lines[1].contains(" WARN "));
        assert!(lines[1].contains("Unauthorized"));
        assert!(!contents.contains('\u{1b}'));
    }

    #[test]
    fn sync_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let logger = Logger::init(&file_config(&dir.path().join("auth.log"))).unwrap();
        logger.sync();
        logger.sync();
        logger.in_scope(|| tracing::info!("after sync"));
    }

    #[test]
    fn events_outside_scope_are_not_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth.log");
        let logger = Logger::init(&file_config(&path)).unwrap();

        tracing::info!("unscoped");
        logger.in_scope(|| tracing::info!("scoped"));
        logger.sync();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("scoped"));
        assert!(!contents.contains("unscoped"));
    }
}

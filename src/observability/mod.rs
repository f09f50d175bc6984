//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Middleware and handlers produce:
//!     → logging.rs (leveled, structured log events)
//!
//! Consumers:
//!     → stdout (console encoding)
//!     → rotation.rs (size-rotated, gzipped log file)
//! ```
//!
//! # Design Decisions
//! - One logger per process, constructed explicitly and injected
//! - Same line format for stdout and the file

pub mod logging;
pub mod rotation;

pub use logging::{Logger, LoggerError};
pub use rotation::{RotatingFile, RotationPolicy};

//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! compiled-in defaults
//!     → schema.rs (ServiceConfig::default)
//!     → validation.rs (semantic checks on the logging section)
//!     → handed by value to the logger and the HTTP server
//! ```
//!
//! # Design Decisions
//! - No flags or config files: the values are fixed for this service
//! - All fields have defaults so tests can override a single setting

pub mod schema;
pub mod validation;

pub use schema::{AuthConfig, ListenerConfig, LoggingConfig, ServiceConfig};
pub use validation::{validate_logging, ConfigError};

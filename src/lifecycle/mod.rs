//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Defaults → Validate → Build logger (or exit 1) → Bind listener (or fatal)
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain connections → Flush logger → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The logger exists before anything else so every later failure is recorded

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;

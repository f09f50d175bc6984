//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware chain)
//!     → middleware/ (request log line)
//!     → handlers.rs (credential check, not-found fallback)
//!     → response.rs (JSON status body)
//!     → Send to client
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use response::StatusBody;
pub use server::{AppState, HttpServer};

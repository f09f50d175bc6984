//! Request interceptors, applied in registration order before the route handler.

pub mod request_log;

pub use request_log::log_request;

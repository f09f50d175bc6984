//! Request logging middleware.
//! Records every inbound request before any route handler runs.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::http::request::client_ip;
use crate::http::server::AppState;

pub async fn log_request(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let ip = client_ip(&request);
    let query = request.uri().query().unwrap_or_default();

    state.logger.in_scope(|| {
        tracing::debug!(
            ip = %ip,
            method = %request.method(),
            path = %request.uri().path(),
            query = %query,
            "Request"
        );
    });

    next.run(request).await
}

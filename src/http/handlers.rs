//! Route handlers.

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};

use crate::http::request::query_param;
use crate::http::response::status_response;
use crate::http::server::AppState;

/// `GET /test`: compare the credential query parameter to the expected value.
pub async fn check_auth(State(state): State<AppState>, uri: Uri) -> Response {
    let supplied = query_param(uri.query(), &state.auth.query_param);

    state.logger.in_scope(|| {
        if !state.auth.is_authorized(&supplied) {
            tracing::warn!("Unauthorized");
            return status_response(StatusCode::UNAUTHORIZED);
        }

        tracing::info!("Authorized");
        let response = status_response(StatusCode::OK);
        tracing::info!("OK");
        response
    })
}

/// Default for unknown paths and for other methods on known paths.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "404 page not found")
}

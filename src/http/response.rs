//! Response bodies.
//!
//! Every response from the credential check is `{"code": <status>}` with the
//! body code mirroring the HTTP status line.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// JSON status body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBody {
    pub code: u16,
}

/// Response carrying `status` both on the wire and in the JSON body.
pub fn status_response(status: StatusCode) -> Response {
    (status, Json(StatusBody { code: status.as_u16() })).into_response()
}

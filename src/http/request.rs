//! Request inspection.
//!
//! # Responsibilities
//! - Resolve the client address (proxy headers first, then the socket peer)
//! - Read a single query parameter from the raw query string
//!
//! # Design Decisions
//! - Proxy headers are trusted unconditionally; the service has no proxy allowlist
//! - Repeated query parameters resolve to the first occurrence

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{HeaderMap, Request},
};
use std::net::SocketAddr;

pub const X_FORWARDED_FOR: &str = "x-forwarded-for";
pub const X_REAL_IP: &str = "x-real-ip";

/// Best-effort client IP for logging.
///
/// Returns an empty string when neither headers nor connection info are present
/// (e.g. requests dispatched directly to the router in tests).
pub fn client_ip(request: &Request<Body>) -> String {
    if let Some(ip) = forwarded_ip(request.headers()) {
        return ip;
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_default()
}

fn forwarded_ip(headers: &HeaderMap) -> Option<String> {
    header_value(headers, X_FORWARDED_FOR)
        .and_then(|list| list.split(',').map(str::trim).find(|ip| !ip.is_empty()))
        .or_else(|| header_value(headers, X_REAL_IP))
        .map(str::to_string)
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// First value of `name` in the raw query, percent-decoded; empty when absent.
pub fn query_param(raw_query: Option<&str>, name: &str) -> String {
    raw_query
        .and_then(|query| {
            url::form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.into_owned())
        })
        .unwrap_or_default()
}

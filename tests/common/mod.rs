//! Shared utilities for integration and load testing.

#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use auth_gate::config::{LoggingConfig, ServiceConfig};
use auth_gate::http::HttpServer;
use auth_gate::observability::Logger;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use tower::ServiceExt as _;
use tracing_subscriber::fmt::MakeWriter;

/// In-memory log sink shared between the logger and the test.
#[derive(Clone, Default)]
pub struct CaptureWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl CaptureWriter {
    pub fn lines(&self) -> Vec<LogLine> {
        let buf = self.buf.lock().unwrap();
        String::from_utf8_lossy(&buf)
            .lines()
            .map(|line| LogLine(line.to_string()))
            .collect()
    }
}

impl Write for CaptureWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CaptureWriter {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// One console-encoded line: `time LEVEL target: file:line: message fields`.
#[derive(Debug, Clone)]
pub struct LogLine(pub String);

impl LogLine {
    pub fn level(&self) -> &str {
        self.0.split_whitespace().nth(1).unwrap_or_default()
    }

    /// Message plus fields, after the `file:line:` caller prefix.
    pub fn body(&self) -> &str {
        self.0.splitn(3, ": ").nth(2).unwrap_or_default()
    }

    pub fn message(&self) -> &str {
        self.body().split_whitespace().next().unwrap_or_default()
    }

    pub fn has_field(&self, key: &str, value: &str) -> bool {
        self.body()
            .split_whitespace()
            .any(|kv| kv == format!("{key}={value}"))
    }
}

/// Server wired to a capturing logger.
pub fn test_server() -> (HttpServer, CaptureWriter) {
    let capture = CaptureWriter::default();
    let logger = Logger::with_writer(&LoggingConfig::default(), capture.clone()).unwrap();
    (HttpServer::new(ServiceConfig::default(), logger), capture)
}

/// Dispatch a request straight into the router.
pub async fn send(router: &Router, method: Method, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

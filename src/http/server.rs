//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the credential check route
//! - Wire up the ordered middleware chain (request logging)
//! - Bind server to listener
//! - Serve until the shutdown signal fires

use axum::{middleware, routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;

use crate::config::{AuthConfig, ServiceConfig};
use crate::http::handlers::{check_auth, not_found};
use crate::http::middleware::log_request;
use crate::observability::Logger;

/// Application state injected into handlers and middleware.
#[derive(Clone)]
pub struct AppState {
    pub logger: Logger,
    pub auth: Arc<AuthConfig>,
}

impl AppState {
    pub fn new(logger: Logger, auth: AuthConfig) -> Self {
        Self {
            logger,
            auth: Arc::new(auth),
        }
    }
}

/// HTTP server for the credential check.
pub struct HttpServer {
    router: Router,
    logger: Logger,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig, logger: Logger) -> Self {
        let state = AppState::new(logger.clone(), config.auth);
        let router = Self::build_router(state);
        Self { router, logger }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layers run top to bottom for every request, fallbacks included.
    pub fn build_router(state: AppState) -> Router {
        let interceptors = ServiceBuilder::new()
            .layer(middleware::from_fn_with_state(state.clone(), log_request));

        Router::new()
            .route("/test", get(check_auth).fallback(not_found))
            .fallback(not_found)
            .with_state(state)
            .layer(interceptors)
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        self.logger.in_scope(|| {
            tracing::info!(
                address = %addr,
                "HTTP server starting"
            );
        });

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        self.logger.in_scope(|| tracing::info!("HTTP server stopped"));
        Ok(())
    }

    /// Clone of the router, for dispatching requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

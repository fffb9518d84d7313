//! HTTP access to the voice preference store.
//!
//! Endpoints:
//! - `GET  /voice`  current voice and the full catalogue
//! - `POST /voice`  set the voice from a `{"voice": "<name>"}` body
//!
//! Both are also mounted under `/api` for clients of the earlier bridge.

mod error;
mod routes;

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::preference::VoicePreferenceStore;

pub use error::{ApiError, ErrorResponse};
pub use routes::{VoiceStatus, VoiceUpdated, create_routes};

/// Shared state for all handlers.
#[derive(Debug)]
pub struct AppState {
    pub store: Arc<VoicePreferenceStore>,
}

impl AppState {
    pub fn new(store: Arc<VoicePreferenceStore>) -> Self {
        Self { store }
    }
}

/// Build the application router with tracing and state attached.
pub fn app(state: AppState) -> Router {
    create_routes().layer(TraceLayer::new_for_http()).with_state(Arc::new(state))
}

/// Listen address for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 5000 }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self { host: host.into(), port }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// HTTP server exposing the preference store.
pub struct HttpServer {
    config: ServerConfig,
    state: AppState,
}

impl HttpServer {
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Serve until `shutdown_signal` resolves, then drain in-flight requests.
    ///
    /// # Errors
    /// Returns an error if the listen address cannot be bound.
    pub async fn run_with_shutdown<F>(self, shutdown_signal: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.addr();
        let router = app(self.state);

        let listener = TcpListener::bind(&addr).await?;
        info!("🌐 Voice bridge listening on http://{}", listener.local_addr()?);

        axum::serve(listener, router).with_graceful_shutdown(shutdown_signal).await?;

        info!("HTTP server stopped");
        Ok(())
    }
}

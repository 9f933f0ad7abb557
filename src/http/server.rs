//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router: one fallback handler for every method and path
//! - Wire up middleware (request tracing)
//! - Serve the listener until shutdown is signalled

use std::future::Future;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::http::response::ServedFile;
use crate::net::ClientAddr;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub file: Arc<ServedFile>,
}

/// HTTP server for the download responder.
pub struct HttpServer {
    router: Router,
    config: Arc<ServerConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: Arc<ServerConfig>) -> Self {
        let state = AppState {
            file: Arc::new(ServedFile::new(config.file_path())),
        };

        Self {
            router: Self::build_router(state),
            config,
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .fallback(download_handler)
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// Router without connect info, for in-process tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server on `listener` until `shutdown` resolves.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            file = %self.config.file_path().display(),
            "HTTP server starting"
        );

        let app = self
            .router
            .into_make_service_with_connect_info::<ClientAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Answers every request with the served file.
async fn download_handler(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Response {
    // Absent when the router is driven without a listener.
    let peer = request
        .extensions()
        .get::<ConnectInfo<ClientAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    tracing::info!(
        file = state.file.file_name(),
        peer_addr = %peer,
        "Streaming file to client"
    );

    match state.file.open().await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(
                path = %state.file.path().display(),
                peer_addr = %peer,
                error = %e,
                "Failed to open served file"
            );
            (StatusCode::INTERNAL_SERVER_ERROR, "file unavailable").into_response()
        }
    }
}

//! HTTP server exposing the `/api/*` pass-through route.

use axum::{
    Json, Router,
    body::Body,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, Method, Response, Uri},
    response::IntoResponse,
    routing::get,
};
use bytes::Bytes;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ProxyConfig;
use crate::error::ProxyError;
use crate::forward::Forwarder;

/// Shared state for the proxy server.
struct ProxyState {
    forwarder: Forwarder,
}

/// The reverse proxy server.
pub struct ProxyServer {
    config: ProxyConfig,
    state: Arc<ProxyState>,
}

impl ProxyServer {
    pub fn new(config: ProxyConfig) -> crate::Result<Self> {
        let forwarder = Forwarder::new(config.upstream_base_url.clone())?;
        Ok(Self {
            state: Arc::new(ProxyState { forwarder }),
            config,
        })
    }

    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// Build the axum router.
    pub fn router(&self) -> Router {
        let mut router = Router::new()
            .route(
                "/api/{*path}",
                get(handle_forward)
                    .post(handle_forward)
                    .put(handle_forward)
                    .patch(handle_forward)
                    .delete(handle_forward),
            )
            .route("/health", get(handle_health))
            .layer(DefaultBodyLimit::disable())
            .with_state(self.state.clone());

        if self.config.enable_cors {
            router = router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        if self.config.request_logging {
            router = router.layer(TraceLayer::new_for_http());
        }

        router
    }

    /// Run the proxy server until the process exits.
    pub async fn run(self) -> std::io::Result<()> {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(
            addr = %local_addr,
            upstream = %self.config.upstream_base_url,
            "Starting Pawship proxy server"
        );
        axum::serve(listener, self.router()).await
    }

    /// Run with graceful shutdown, returning the bound address.
    pub async fn run_with_shutdown(
        self,
        shutdown: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> std::io::Result<SocketAddr> {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(
            addr = %local_addr,
            upstream = %self.config.upstream_base_url,
            "Starting Pawship proxy server"
        );
        tokio::spawn(async move {
            axum::serve(listener, self.router())
                .with_graceful_shutdown(shutdown)
                .await
                .ok();
        });
        Ok(local_addr)
    }
}

/// Handle GET/POST/PUT/PATCH/DELETE /api/{*path}
async fn handle_forward(
    State(state): State<Arc<ProxyState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response<Body>, ProxyError> {
    state.forwarder.forward(method, &uri, &headers, body).await
}

/// Handle GET /health
async fn handle_health(State(state): State<Arc<ProxyState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "pawship-proxy",
        "upstream": state.forwarder.upstream_base_url()
    }))
}

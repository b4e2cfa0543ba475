//! Same-origin reverse proxy for the Pawship API.
//!
//! Serves `ANY /api/{*path}` and forwards each request to
//! `{upstream}/{path}{?query}` without interpreting it: headers pass through
//! except `host` and `content-length`, bodies are forwarded as raw bytes, and
//! upstream redirects are returned rather than followed. Transport failures
//! surface as `502 Bad Gateway`.
//!
//! ```no_run
//! use pawship_proxy::{ProxyConfig, ProxyServer, upstream_from_env};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ProxyConfig::default().with_upstream(upstream_from_env(None));
//! ProxyServer::new(config)?.run().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod forward;
pub mod proxy;

pub use config::{
    DEFAULT_PORT, DEFAULT_UPSTREAM_BASE_URL, ProxyConfig, UPSTREAM_ENV_VARS,
    resolve_upstream_base_url, upstream_from_env,
};
pub use error::{ProxyError, Result};
pub use forward::{Forwarder, PROXY_PREFIX, forward_request_headers, forward_response_headers};
pub use proxy::ProxyServer;

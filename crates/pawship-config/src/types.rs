//! Configuration types mapping to the TOML schema.
//!
//! ```toml
//! [client]
//! server_url = "http://localhost:3000"
//! timeout_secs = 60
//! token_file = "/home/me/.config/pawship/tokens.json"
//!
//! [proxy]
//! bind_address = "127.0.0.1:3000"
//! upstream_base_url = "https://api-pawship-grooming.zullstack.dev"
//! request_logging = true
//! cors = false
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use serde::Deserialize;

use crate::{ConfigError, Result};

/// Origin serving the `/api` proxy that the CLI talks to.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

/// Listen address for `pawship serve`.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";

// ─────────────────────────────────────────────────────────────────────────────
// Top-level Config
// ─────────────────────────────────────────────────────────────────────────────

/// Root configuration structure.
///
/// All sections are optional so that partial configs (e.g. a project-local
/// `pawship.toml`) can be loaded and merged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PawshipConfig {
    /// API client settings used by the CLI.
    pub client: Option<ClientConfig>,

    /// Reverse proxy settings used by `pawship serve`.
    pub proxy: Option<ProxyConfig>,
}

impl PawshipConfig {
    /// Create an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Merge another config on top of this one (other takes priority).
    ///
    /// Sections are replaced whole, not merged field by field.
    pub fn merge(&mut self, other: PawshipConfig) {
        if other.client.is_some() {
            self.client = other.client;
        }

        if other.proxy.is_some() {
            self.proxy = other.proxy;
        }
    }

    /// Client settings, or defaults when the section is absent.
    pub fn client(&self) -> ClientConfig {
        self.client.clone().unwrap_or_default()
    }

    /// Proxy settings, or defaults when the section is absent.
    pub fn proxy(&self) -> ProxyConfig {
        self.proxy.clone().unwrap_or_default()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Client Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// `[client]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL the client mounts `/api` under.
    pub server_url: String,
    /// Per-request timeout in seconds; requests are unbounded when unset.
    pub timeout_secs: Option<u64>,
    /// Token file; `<config dir>/tokens.json` when unset.
    pub token_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            timeout_secs: None,
            token_file: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Proxy Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// `[proxy]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Socket address to listen on.
    pub bind_address: String,
    /// Upstream API base; environment variables take priority over this.
    pub upstream_base_url: Option<String>,
    /// Enable per-request trace logging.
    pub request_logging: bool,
    /// Enable permissive CORS headers.
    pub cors: bool,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            upstream_base_url: None,
            request_logging: true,
            cors: false,
        }
    }
}

impl ProxyConfig {
    /// Parse `bind_address`.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.bind_address
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
                field: "proxy.bind_address".to_string(),
                message: e.to_string(),
            })
    }
}

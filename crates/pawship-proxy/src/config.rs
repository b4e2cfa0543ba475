//! Proxy configuration and upstream resolution.

use std::net::{Ipv4Addr, SocketAddr};

/// Upstream used when neither the environment nor the config names one.
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://api-pawship-grooming.zullstack.dev";

/// Environment variables consulted for the upstream, in priority order.
pub const UPSTREAM_ENV_VARS: [&str; 2] = ["BACKEND_API_BASE_URL", "PAWSHIP_API_BASE_URL"];

/// Default listen port for `pawship serve`.
pub const DEFAULT_PORT: u16 = 3000;

/// Configuration for the proxy server.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub bind_addr: SocketAddr,
    /// Base URL requests under `/api/` are forwarded to, without trailing slash.
    pub upstream_base_url: String,
    pub enable_cors: bool,
    pub request_logging: bool,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
            upstream_base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            enable_cors: false,
            request_logging: true,
        }
    }
}

impl ProxyConfig {
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            ..Default::default()
        }
    }

    pub fn with_upstream(mut self, base_url: impl AsRef<str>) -> Self {
        self.upstream_base_url = normalize_base_url(base_url.as_ref());
        self
    }

    pub fn with_cors(mut self, enable: bool) -> Self {
        self.enable_cors = enable;
        self
    }

    pub fn with_request_logging(mut self, enable: bool) -> Self {
        self.request_logging = enable;
        self
    }
}

/// Resolve the upstream base URL.
///
/// `BACKEND_API_BASE_URL` wins, then `PAWSHIP_API_BASE_URL`, then the
/// configured value, then [`DEFAULT_UPSTREAM_BASE_URL`]. Empty values count
/// as unset. `lookup` reads a variable; pass `|k| std::env::var(k).ok()` in
/// production.
pub fn resolve_upstream_base_url<F>(configured: Option<&str>, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let from_env = UPSTREAM_ENV_VARS.iter().find_map(|key| {
        lookup(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    });

    let chosen = from_env
        .or_else(|| {
            configured
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(String::from)
        })
        .unwrap_or_else(|| DEFAULT_UPSTREAM_BASE_URL.to_string());

    normalize_base_url(&chosen)
}

/// Resolve the upstream from the process environment.
pub fn upstream_from_env(configured: Option<&str>) -> String {
    resolve_upstream_base_url(configured, |key| std::env::var(key).ok())
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_when_nothing_set() {
        assert_eq!(
            resolve_upstream_base_url(None, env(&[])),
            DEFAULT_UPSTREAM_BASE_URL
        );
    }

    #[test]
    fn test_first_env_var_wins() {
        let lookup = env(&[
            ("BACKEND_API_BASE_URL", "http://a.test"),
            ("PAWSHIP_API_BASE_URL", "http://b.test"),
        ]);
        assert_eq!(
            resolve_upstream_base_url(Some("http://c.test"), lookup),
            "http://a.test"
        );
    }

    #[test]
    fn test_second_env_var_when_first_empty() {
        let lookup = env(&[
            ("BACKEND_API_BASE_URL", ""),
            ("PAWSHIP_API_BASE_URL", "http://b.test/"),
        ]);
        assert_eq!(resolve_upstream_base_url(None, lookup), "http://b.test");
    }

    #[test]
    fn test_configured_value_below_env() {
        assert_eq!(
            resolve_upstream_base_url(Some("http://c.test//"), env(&[])),
            "http://c.test"
        );
        assert_eq!(
            resolve_upstream_base_url(Some("  "), env(&[])),
            DEFAULT_UPSTREAM_BASE_URL
        );
    }

    #[test]
    fn test_config_builders() {
        let config = ProxyConfig::default()
            .with_upstream("http://localhost:4000/")
            .with_cors(true)
            .with_request_logging(false);
        assert_eq!(config.upstream_base_url, "http://localhost:4000");
        assert!(config.enable_cors);
        assert!(!config.request_logging);
        assert_eq!(config.bind_addr.port(), DEFAULT_PORT);
    }
}

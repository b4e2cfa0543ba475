//! Error types for the reverse proxy.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, ProxyError>;

/// Errors that can occur while forwarding a request.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// The upstream could not be reached or the exchange failed mid-flight.
    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// The forwarded response could not be assembled.
    #[error("Failed to build response: {0}")]
    Response(#[from] axum::http::Error),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),
}

impl ProxyError {
    /// HTTP status returned to the caller for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ProxyError::Response(_) | ProxyError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ProxyError::Upstream(_) => "upstream_error",
            ProxyError::Response(_) => "response_error",
            ProxyError::Config(_) => "config_error",
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Proxy forwarding failed");

        let body = serde_json::json!({
            "type": "error",
            "error": {
                "type": self.kind(),
                "message": self.to_string()
            }
        });

        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_status() {
        let err = ProxyError::Config("bad upstream".into());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Config error: bad upstream");
    }

    #[tokio::test]
    async fn test_upstream_error_is_bad_gateway() {
        // Nothing listens on port 1
        let err = reqwest::Client::new()
            .get("http://127.0.0.1:1/")
            .send()
            .await
            .unwrap_err();
        let response = ProxyError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}

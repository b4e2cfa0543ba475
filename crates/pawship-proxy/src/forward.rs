//! Forwarding of proxied requests to the upstream API.
//!
//! The proxy is a dumb pipe: it authenticates nothing and rewrites nothing
//! beyond the framing headers its own transport recomputes.

use axum::body::Body;
use axum::http::{HeaderMap, HeaderName, Method, Response, Uri, header};
use bytes::Bytes;
use futures::StreamExt;
use reqwest::{Client, redirect};

use crate::error::Result;

/// Path prefix of the proxied route; everything after it is forwarded.
pub const PROXY_PREFIX: &str = "/api/";

/// Forwards requests to one upstream base URL.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: Client,
    upstream_base_url: String,
}

impl Forwarder {
    /// Create a forwarder. Upstream redirects are returned to the caller,
    /// never followed.
    pub fn new(upstream_base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self {
            client,
            upstream_base_url: upstream_base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn upstream_base_url(&self) -> &str {
        &self.upstream_base_url
    }

    /// Upstream URL for an incoming request URI: the base, the path after
    /// `/api/`, and the original query string.
    pub fn target_url(&self, uri: &Uri) -> String {
        let path = uri.path();
        let rest = path
            .strip_prefix(PROXY_PREFIX)
            .unwrap_or_else(|| path.trim_start_matches('/'));

        match uri.query().filter(|query| !query.is_empty()) {
            Some(query) => format!("{}/{}?{}", self.upstream_base_url, rest, query),
            None => format!("{}/{}", self.upstream_base_url, rest),
        }
    }

    /// Forward one request and relay the upstream response.
    ///
    /// The body is sent byte-for-byte for every method except GET and HEAD.
    /// The response body is streamed back as it arrives.
    pub async fn forward(
        &self,
        method: Method,
        uri: &Uri,
        headers: &HeaderMap,
        body: Bytes,
    ) -> Result<Response<Body>> {
        let target = self.target_url(uri);
        tracing::debug!(method = %method, target = %target, "Forwarding request upstream");

        let mut request = self
            .client
            .request(method.clone(), &target)
            .headers(forward_request_headers(headers));
        if carries_body(&method) {
            request = request.body(body);
        }

        let upstream = request.send().await?;
        let status = upstream.status();
        let response_headers = forward_response_headers(upstream.headers());
        tracing::debug!(status = status.as_u16(), target = %target, "Upstream responded");

        let stream = upstream
            .bytes_stream()
            .map(|result| result.map_err(std::io::Error::other));

        let mut response = Response::builder()
            .status(status)
            .body(Body::from_stream(stream))?;
        *response.headers_mut() = response_headers;
        Ok(response)
    }
}

/// Incoming headers minus `host` and `content-length`.
pub fn forward_request_headers(headers: &HeaderMap) -> HeaderMap {
    without(headers, &[header::HOST, header::CONTENT_LENGTH])
}

/// Upstream headers minus `content-encoding` and `content-length`.
pub fn forward_response_headers(headers: &HeaderMap) -> HeaderMap {
    without(headers, &[header::CONTENT_ENCODING, header::CONTENT_LENGTH])
}

fn without(headers: &HeaderMap, dropped: &[HeaderName]) -> HeaderMap {
    let mut kept = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if !dropped.contains(name) {
            kept.append(name.clone(), value.clone());
        }
    }
    kept
}

fn carries_body(method: &Method) -> bool {
    method != Method::GET && method != Method::HEAD
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn forwarder() -> Forwarder {
        Forwarder::new("http://upstream.test/").unwrap()
    }

    #[test]
    fn test_target_url_joins_path() {
        let uri: Uri = "/api/users/abc".parse().unwrap();
        assert_eq!(forwarder().target_url(&uri), "http://upstream.test/users/abc");
    }

    #[test]
    fn test_target_url_keeps_query() {
        let uri: Uri = "/api/options?category=breed%20category&page=2"
            .parse()
            .unwrap();
        assert_eq!(
            forwarder().target_url(&uri),
            "http://upstream.test/options?category=breed%20category&page=2"
        );
    }

    #[test]
    fn test_target_url_drops_empty_query() {
        let uri: Uri = "/api/stores?".parse().unwrap();
        assert_eq!(forwarder().target_url(&uri), "http://upstream.test/stores");
    }

    #[test]
    fn test_request_headers_scrubbed() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("foo"));
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("10"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer T"));
        headers.insert("x-request-id", HeaderValue::from_static("r-1"));

        let forwarded = forward_request_headers(&headers);
        assert!(forwarded.get(header::HOST).is_none());
        assert!(forwarded.get(header::CONTENT_LENGTH).is_none());
        assert_eq!(forwarded.get(header::AUTHORIZATION).unwrap(), "Bearer T");
        assert_eq!(forwarded.get("x-request-id").unwrap(), "r-1");
        assert_eq!(forwarded.len(), 2);
    }

    #[test]
    fn test_response_headers_scrubbed() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_ENCODING, HeaderValue::from_static("gzip"));
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("42"));
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.append(header::SET_COOKIE, HeaderValue::from_static("a=1"));
        headers.append(header::SET_COOKIE, HeaderValue::from_static("b=2"));

        let forwarded = forward_response_headers(&headers);
        assert!(forwarded.get(header::CONTENT_ENCODING).is_none());
        assert!(forwarded.get(header::CONTENT_LENGTH).is_none());
        assert_eq!(forwarded.get(header::CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(forwarded.get_all(header::SET_COOKIE).iter().count(), 2);
    }

    #[test]
    fn test_body_methods() {
        assert!(!carries_body(&Method::GET));
        assert!(!carries_body(&Method::HEAD));
        assert!(carries_body(&Method::POST));
        assert!(carries_body(&Method::PATCH));
        assert!(carries_body(&Method::DELETE));
    }
}

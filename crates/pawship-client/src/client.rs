//! Main client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::Mutex;
use url::Url;

use crate::api::{AuthApi, OptionsApi, StoresApi, UsersApi, tokens_from_payload};
use crate::error::{Error, Result};
use crate::request::{ApiRequest, RequestBody};
use crate::token_store::{MemoryTokenStore, SharedTokenStore};
use crate::types::{AuthTokens, MessageResponse, RefreshRequest};

/// Path prefix every relative API path is mounted under.
pub const API_BASE_PATH: &str = "/api";

/// Refresh endpoint, relative to [`API_BASE_PATH`].
pub const REFRESH_PATH: &str = "/auth/refresh";

/// Pawship API client.
///
/// Cheap to clone; clones share the HTTP connection pool, the token store
/// and the refresh gate.
///
/// # Example
///
/// ```no_run
/// use pawship_client::{ApiClient, ApiRequest};
///
/// # async fn example() -> pawship_client::Result<()> {
/// let client = ApiClient::builder()
///     .base_url("http://localhost:3000")
///     .build()?;
///
/// let tokens = client.auth().login("admin@pawship.id", "secret").await?;
/// client.store_tokens(&tokens);
///
/// let users = client.auth_request(ApiRequest::get("/users?page=1&limit=10")).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

/// Inner client state (shared across clones).
pub(crate) struct ClientInner {
    /// HTTP client.
    pub(crate) http: reqwest::Client,
    /// Origin the `/api` prefix is appended to.
    pub(crate) base_url: Url,
    /// Per-request timeout; unbounded when unset.
    pub(crate) timeout: Option<Duration>,
    /// Token persistence.
    pub(crate) tokens: SharedTokenStore,
    /// Serializes token refreshes across concurrent requests.
    refresh_gate: Mutex<()>,
}

/// Result of a single network round trip, before classification.
#[derive(Debug)]
struct Outcome {
    status: StatusCode,
    /// Parsed JSON body, `Value::Null` when the body is empty or not JSON.
    payload: Value,
    /// Access token attached to the request, if any.
    sent_token: Option<String>,
}

impl Outcome {
    /// Success → payload (`None` for 204); failure → [`Error::Api`].
    fn into_payload(self) -> Result<Option<Value>> {
        if !self.status.is_success() {
            return Err(Error::from_response(self.status.as_u16(), &self.payload));
        }
        if self.status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        Ok(Some(self.payload))
    }
}

impl ApiClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Get the token store.
    pub fn token_store(&self) -> &SharedTokenStore {
        &self.inner.tokens
    }

    /// Persist a token pair from login or refresh.
    pub fn store_tokens(&self, tokens: &AuthTokens) {
        self.inner
            .tokens
            .set_auth_tokens(&tokens.access_token, &tokens.refresh_token);
        tracing::info!("Session tokens stored");
    }

    /// Whether an access token is currently stored.
    pub fn is_authenticated(&self) -> bool {
        self.inner.tokens.get_access_token().is_some()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Access the auth API.
    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.clone())
    }

    /// Access the users API.
    pub fn users(&self) -> UsersApi {
        UsersApi::new(self.clone())
    }

    /// Access the options API.
    pub fn options(&self) -> OptionsApi {
        OptionsApi::new(self.clone())
    }

    /// Access the stores API.
    pub fn stores(&self) -> StoresApi {
        StoresApi::new(self.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Requests
    // ─────────────────────────────────────────────────────────────────────────

    /// Execute one logical API call.
    ///
    /// Returns the parsed JSON payload, `Some(Value::Null)` for a 2xx body
    /// that is not JSON, and `None` for 204. For authenticated requests a
    /// 401 triggers at most one token refresh and one retry.
    pub async fn request(&self, request: ApiRequest) -> Result<Option<Value>> {
        self.execute_with_refresh(request).await
    }

    /// [`request`](Self::request) with the stored access token attached.
    pub async fn auth_request(&self, request: ApiRequest) -> Result<Option<Value>> {
        self.request(request.auth(true)).await
    }

    /// Execute `request` and deserialize the payload into `T`.
    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let payload = self.request(request).await?;
        Ok(serde_json::from_value(payload.unwrap_or(Value::Null))?)
    }

    /// Execute a write whose reply is a status message.
    ///
    /// A 204 or a 2xx body that is not JSON resolves to an empty message.
    pub async fn send_message(&self, request: ApiRequest) -> Result<MessageResponse> {
        let reply: Option<MessageResponse> = self.send(request).await?;
        Ok(reply.unwrap_or_default())
    }

    /// Make an authenticated GET request.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(ApiRequest::get(path).auth(true)).await
    }

    /// Make an authenticated POST request with a JSON body.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(ApiRequest::post(path).json(body)?.auth(true))
            .await
    }

    /// Make an authenticated PUT request with a JSON body.
    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(ApiRequest::put(path).json(body)?.auth(true)).await
    }

    /// Make an authenticated PATCH request with a JSON body.
    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(ApiRequest::patch(path).json(body)?.auth(true))
            .await
    }

    /// Make an authenticated DELETE request.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(ApiRequest::delete(path).auth(true)).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal HTTP methods
    // ─────────────────────────────────────────────────────────────────────────

    /// Build a URL for an API path.
    ///
    /// Absolute `http(s)://` URLs pass through unchanged; anything else is
    /// mounted under `/api` on the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Ok(Url::parse(path)?);
        }

        let normalized = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };
        let base = self.inner.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{}{}{}", base, API_BASE_PATH, normalized))?)
    }

    /// Refresh-aware execution: one send, then on a refresh-eligible 401 one
    /// refresh and exactly one retry marked `skip_refresh`.
    async fn execute_with_refresh(&self, request: ApiRequest) -> Result<Option<Value>> {
        let outcome = self.execute_once(&request).await?;
        if !request.is_refresh_eligible(outcome.status) {
            return outcome.into_payload();
        }

        tracing::debug!(path = %request.path, "Access token rejected, refreshing session");
        self.refresh_session(outcome.sent_token.as_deref()).await?;

        let retry = request.into_retry();
        self.execute_once(&retry).await?.into_payload()
    }

    /// Send `request` once and parse the response. Never refreshes.
    async fn execute_once(&self, request: &ApiRequest) -> Result<Outcome> {
        let url = self.url(&request.path)?;
        let mut headers = request.headers.clone();

        let mut sent_token = None;
        if request.auth
            && let Some(token) = self.inner.tokens.get_access_token()
        {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| Error::Config("Stored access token is not a valid header value".to_string()))?;
            headers.insert(AUTHORIZATION, value);
            sent_token = Some(token);
        }

        if let Some(body) = &request.body
            && !body.is_multipart()
            && !headers.contains_key(CONTENT_TYPE)
        {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        let mut builder = self
            .inner
            .http
            .request(request.method.clone(), url)
            .headers(headers);
        if let Some(timeout) = self.inner.timeout {
            builder = builder.timeout(timeout);
        }

        builder = match &request.body {
            Some(RequestBody::Text(text)) => builder.body(text.clone()),
            Some(RequestBody::Bytes(bytes)) => builder.body(bytes.clone()),
            Some(RequestBody::Form(form)) => builder.multipart(form.to_form()?),
            None => builder,
        };

        tracing::debug!(
            method = %request.method,
            path = %request.path,
            auth = request.auth,
            retry = request.skip_refresh,
            "Sending API request"
        );

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        let payload = serde_json::from_slice(&body).unwrap_or(Value::Null);

        tracing::debug!(path = %request.path, status = status.as_u16(), "API response");

        Ok(Outcome {
            status,
            payload,
            sent_token,
        })
    }

    /// Replace the stored token pair after `rejected_token` got a 401.
    ///
    /// Any failure clears both tokens and yields [`Error::SessionExpired`].
    async fn refresh_session(&self, rejected_token: Option<&str>) -> Result<()> {
        let _gate = self.inner.refresh_gate.lock().await;
        let tokens = &self.inner.tokens;

        // A concurrent request already swapped in a new pair.
        if let Some(current) = tokens.get_access_token()
            && Some(current.as_str()) != rejected_token
        {
            tracing::debug!("Session already refreshed by a concurrent request");
            return Ok(());
        }

        let Some(refresh_token) = tokens.get_refresh_token() else {
            tracing::info!("No refresh token stored, session expired");
            tokens.clear_auth_tokens();
            return Err(Error::SessionExpired);
        };

        match self.request_token_refresh(&refresh_token).await {
            Ok(pair) => {
                tokens.set_auth_tokens(&pair.access_token, &pair.refresh_token);
                tracing::info!("Session refreshed");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Token refresh failed, clearing session");
                tokens.clear_auth_tokens();
                Err(Error::SessionExpired)
            }
        }
    }

    /// Call the refresh endpoint directly, outside the refreshing path.
    pub(crate) async fn request_token_refresh(&self, refresh_token: &str) -> Result<AuthTokens> {
        let request = ApiRequest::post(REFRESH_PATH).json(&RefreshRequest {
            refresh_token: refresh_token.to_string(),
        })?;
        let payload = self.execute_once(&request).await?.into_payload()?;
        tokens_from_payload(payload, "refresh")
    }
}

/// Builder for creating an [`ApiClient`].
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: Option<String>,
    token_store: Option<SharedTokenStore>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            base_url: None,
            token_store: None,
            timeout: None,
            user_agent: None,
        }
    }

    /// Set the origin serving the `/api` routes.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the token store. Defaults to an in-memory store.
    pub fn token_store(mut self, store: SharedTokenStore) -> Self {
        self.token_store = Some(store);
        self
    }

    /// Cap each request at `timeout`. Requests are unbounded by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ApiClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::Config("base_url is required".to_string()))?;

        // Parse and normalize base URL
        let mut base_url = Url::parse(&base_url)?;
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("pawship-client/{}", env!("CARGO_PKG_VERSION")));

        let http = reqwest::Client::builder().user_agent(user_agent).build()?;

        let tokens = self
            .token_store
            .unwrap_or_else(|| Arc::new(MemoryTokenStore::new()));

        Ok(ApiClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                timeout: self.timeout,
                tokens,
                refresh_gate: Mutex::new(()),
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ClientBuilder::new()
            .base_url("http://localhost:3000")
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_requires_base_url() {
        let result = ClientBuilder::new().build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_builder_normalizes_trailing_slash() {
        assert_eq!(client().base_url().as_str(), "http://localhost:3000/");
    }

    #[test]
    fn test_url_building() {
        let client = client();

        let url = client.url("/users").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/users");

        let url = client.url("users?page=1&limit=10").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/users?page=1&limit=10");
    }

    #[test]
    fn test_url_keeps_base_path() {
        let client = ClientBuilder::new()
            .base_url("http://localhost:3000/admin")
            .build()
            .unwrap();
        let url = client.url("/auth/login").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/admin/api/auth/login");
    }

    #[test]
    fn test_absolute_url_passes_through() {
        let client = client();
        let url = client.url("https://maps.example.com/geocode?q=kemang").unwrap();
        assert_eq!(url.as_str(), "https://maps.example.com/geocode?q=kemang");
    }

    #[test]
    fn test_outcome_classification() {
        let no_content = Outcome {
            status: StatusCode::NO_CONTENT,
            payload: serde_json::json!({"ignored": true}),
            sent_token: None,
        };
        assert_eq!(no_content.into_payload().unwrap(), None);

        let not_json = Outcome {
            status: StatusCode::OK,
            payload: Value::Null,
            sent_token: None,
        };
        assert_eq!(not_json.into_payload().unwrap(), Some(Value::Null));

        let failed = Outcome {
            status: StatusCode::BAD_REQUEST,
            payload: serde_json::json!({"message": ["a", "b"]}),
            sent_token: None,
        };
        assert_eq!(failed.into_payload().unwrap_err().to_string(), "a, b");
    }

    #[test]
    fn test_store_tokens() {
        let client = client();
        assert!(!client.is_authenticated());

        client.store_tokens(&AuthTokens {
            message: "ok".to_string(),
            access_token: "AT1".to_string(),
            refresh_token: "RT1".to_string(),
        });
        assert!(client.is_authenticated());
        assert_eq!(
            client.token_store().get_refresh_token().as_deref(),
            Some("RT1")
        );
    }
}

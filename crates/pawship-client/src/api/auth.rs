//! Auth API.

use serde::Deserialize;
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::{Error, Result};
use crate::request::ApiRequest;
use crate::types::{AuthTokens, LoginRequest, MessageResponse, RegisterRequest};

/// Auth API client.
///
/// None of these calls attach a token; they are how tokens are obtained.
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Exchange credentials for a token pair.
    ///
    /// The pair is returned, not stored; see [`ApiClient::store_tokens`].
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthTokens> {
        let request = ApiRequest::post("/auth/login").json(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })?;
        let payload = self.client.request(request).await?;
        tokens_from_payload(payload, "login")
    }

    /// Exchange a refresh token for a new pair.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthTokens> {
        self.client.request_token_refresh(refresh_token).await
    }

    /// Register a customer account.
    pub async fn register(&self, payload: &RegisterRequest) -> Result<MessageResponse> {
        self.client
            .send_message(ApiRequest::post("/auth/register").json(payload)?)
            .await
    }

    /// Forget the stored session. Local only.
    pub fn logout(&self) {
        self.client.token_store().clear_auth_tokens();
        tracing::info!("Session tokens cleared");
    }
}

/// Token fields as the backend may send them.
#[derive(Debug, Default, Deserialize)]
struct TokenPayload {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// Validate that a successful auth response carries both tokens.
///
/// `endpoint` names the response in the error message (`login`, `refresh`).
pub(crate) fn tokens_from_payload(
    payload: Option<Value>,
    endpoint: &'static str,
) -> Result<AuthTokens> {
    let raw = payload
        .and_then(|value| TokenPayload::deserialize(value).ok())
        .unwrap_or_default();

    match (raw.access_token, raw.refresh_token) {
        (Some(access_token), Some(refresh_token))
            if !access_token.is_empty() && !refresh_token.is_empty() =>
        {
            Ok(AuthTokens {
                message: raw.message.unwrap_or_default(),
                access_token,
                refresh_token,
            })
        }
        _ => Err(Error::MissingTokens(endpoint)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tokens_from_payload() {
        let tokens = tokens_from_payload(
            Some(json!({"message": "ok", "access_token": "AT1", "refresh_token": "RT1"})),
            "login",
        )
        .unwrap();
        assert_eq!(tokens.access_token, "AT1");
        assert_eq!(tokens.refresh_token, "RT1");
        assert_eq!(tokens.message, "ok");
    }

    #[test]
    fn test_missing_refresh_token() {
        let err = tokens_from_payload(Some(json!({"access_token": "AT1"})), "login").unwrap_err();
        assert_eq!(err.to_string(), "Token tidak ditemukan pada response login");
    }

    #[test]
    fn test_empty_token_rejected() {
        let err = tokens_from_payload(
            Some(json!({"access_token": "", "refresh_token": "RT1"})),
            "refresh",
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Token tidak ditemukan pada response refresh");
    }

    #[test]
    fn test_non_object_payload() {
        assert!(tokens_from_payload(None, "login").is_err());
        assert!(tokens_from_payload(Some(Value::Null), "login").is_err());
        assert!(tokens_from_payload(Some(json!({"access_token": 5})), "login").is_err());
    }
}
